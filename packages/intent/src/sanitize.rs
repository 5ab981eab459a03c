//! Total sanitizer for model-proposed actions.
//!
//! The model emits free-form JSON; nothing in it is trusted. Every field
//! is coerced into its domain and anything unrecognized collapses to
//! `None` instead of an error.

use serde_json::Value;

use crate::criteria::{AssistantAction, FilterCriteria};

/// Validate and coerce a raw action value into a typed action.
pub fn sanitize_action(raw: &Value) -> Option<AssistantAction> {
    let obj = raw.as_object()?;
    match obj.get("type").and_then(Value::as_str) {
        Some("open_product") => {
            let id = obj.get("id").and_then(Value::as_str)?.trim();
            if id.is_empty() {
                return None;
            }
            Some(AssistantAction::OpenProduct { id: id.to_string() })
        }
        Some("apply_filters") => {
            let empty = serde_json::Map::new();
            let filters = obj.get("filters").and_then(Value::as_object).unwrap_or(&empty);
            Some(AssistantAction::ApplyFilters {
                filters: FilterCriteria {
                    search: string_field(filters.get("search")),
                    category: string_field(filters.get("category")),
                    min_price: canonical_number(filters.get("minPrice")),
                    max_price: canonical_number(filters.get("maxPrice")),
                    in_stock: filters.get("inStock").map(is_truthy).unwrap_or(false),
                    sort_by: enum_field(filters.get("sortBy")),
                    sort_order: enum_field(filters.get("sortOrder")),
                },
                // Absent or null means the panel opens; only an explicit
                // falsy value keeps it closed.
                open_filters: match obj.get("openFilters") {
                    None | Some(Value::Null) => true,
                    Some(value) => is_truthy(value),
                },
            })
        }
        _ => None,
    }
}

fn string_field(value: Option<&Value>) -> String {
    value.and_then(Value::as_str).map(str::to_string).unwrap_or_default()
}

fn enum_field<T>(value: Option<&Value>) -> T
where
    T: Default + std::str::FromStr,
{
    value
        .and_then(Value::as_str)
        .and_then(|s| s.parse().ok())
        .unwrap_or_default()
}

/// Price bound in canonical form: the decimal rendering of a finite
/// number, or the empty string when the value is not one.
fn canonical_number(value: Option<&Value>) -> String {
    let number = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) if !s.trim().is_empty() => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match number {
        Some(n) if n.is_finite() => format_number(n),
        _ => String::new(),
    }
}

/// Render without a trailing `.0` so `100.0` comes out as `"100"`.
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|v| v != 0.0).unwrap_or(false),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criteria::{SortBy, SortOrder};
    use serde_json::json;

    fn filters_of(action: AssistantAction) -> FilterCriteria {
        match action {
            AssistantAction::ApplyFilters { filters, .. } => filters,
            other => panic!("expected apply_filters, got {:?}", other),
        }
    }

    #[test]
    fn test_non_object_and_unknown_types_are_rejected() {
        assert_eq!(sanitize_action(&json!(null)), None);
        assert_eq!(sanitize_action(&json!("apply_filters")), None);
        assert_eq!(sanitize_action(&json!({ "type": "do_magic" })), None);
        assert_eq!(sanitize_action(&json!({ "filters": {} })), None);
    }

    #[test]
    fn test_open_product_requires_non_blank_id() {
        let action = sanitize_action(&json!({ "type": "open_product", "id": " p-1 " }));
        assert_eq!(action, Some(AssistantAction::OpenProduct { id: "p-1".to_string() }));

        assert_eq!(sanitize_action(&json!({ "type": "open_product", "id": "   " })), None);
        assert_eq!(sanitize_action(&json!({ "type": "open_product", "id": 7 })), None);
        assert_eq!(sanitize_action(&json!({ "type": "open_product" })), None);
    }

    #[test]
    fn test_apply_filters_with_missing_filters_object() {
        let action = sanitize_action(&json!({ "type": "apply_filters" })).unwrap();
        match action {
            AssistantAction::ApplyFilters { filters, open_filters } => {
                assert!(open_filters);
                assert_eq!(filters, FilterCriteria::default());
            }
            other => panic!("expected apply_filters, got {:?}", other),
        }
    }

    #[test]
    fn test_bogus_enum_values_fall_back_to_defaults() {
        let filters = filters_of(
            sanitize_action(&json!({
                "type": "apply_filters",
                "filters": { "sortBy": "sideways", "sortOrder": 3 },
            }))
            .unwrap(),
        );
        assert_eq!(filters.sort_by, SortBy::Name);
        assert_eq!(filters.sort_order, SortOrder::Asc);
    }

    #[test]
    fn test_price_bounds_are_canonicalized() {
        let filters = filters_of(
            sanitize_action(&json!({
                "type": "apply_filters",
                "filters": { "minPrice": 50.0, "maxPrice": " 99.5 " },
            }))
            .unwrap(),
        );
        assert_eq!(filters.min_price, "50");
        assert_eq!(filters.max_price, "99.5");

        let filters = filters_of(
            sanitize_action(&json!({
                "type": "apply_filters",
                "filters": { "minPrice": "cheap", "maxPrice": {} },
            }))
            .unwrap(),
        );
        assert_eq!(filters.min_price, "");
        assert_eq!(filters.max_price, "");
    }

    #[test]
    fn test_open_filters_defaults_true_and_null_counts_as_absent() {
        let truthy = |raw: &Value| match sanitize_action(raw).unwrap() {
            AssistantAction::ApplyFilters { open_filters, .. } => open_filters,
            other => panic!("expected apply_filters, got {:?}", other),
        };
        assert!(truthy(&json!({ "type": "apply_filters" })));
        assert!(truthy(&json!({ "type": "apply_filters", "openFilters": null })));
        assert!(truthy(&json!({ "type": "apply_filters", "openFilters": "yes" })));
        assert!(!truthy(&json!({ "type": "apply_filters", "openFilters": false })));
        assert!(!truthy(&json!({ "type": "apply_filters", "openFilters": 0 })));
    }

    #[test]
    fn test_in_stock_coerces_truthiness() {
        let in_stock = |value: Value| {
            let filters = filters_of(
                sanitize_action(&json!({
                    "type": "apply_filters",
                    "filters": { "inStock": value },
                }))
                .unwrap(),
            );
            filters.in_stock
        };
        assert!(in_stock(json!(true)));
        assert!(in_stock(json!(1)));
        assert!(in_stock(json!("sí")));
        assert!(!in_stock(json!(false)));
        assert!(!in_stock(json!(null)));
        assert!(!in_stock(json!("")));
    }

    #[test]
    fn test_non_string_search_becomes_empty() {
        let filters = filters_of(
            sanitize_action(&json!({
                "type": "apply_filters",
                "filters": { "search": 42, "category": ["Anillo"] },
            }))
            .unwrap(),
        );
        assert_eq!(filters.search, "");
        assert_eq!(filters.category, "");
    }
}
