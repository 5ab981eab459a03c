//! Query relaxation for zero-result filter actions.
//!
//! The assistant never hands the storefront an empty catalog. When the
//! sanitized filters match nothing, stage one retries with only the
//! recognized keywords from the utterance and in-stock ordering; stage
//! two drops every filter and recommends whatever is stocked.

use anyhow::Result;
use intent::rules::{keywords_from_message, product_type_keywords};
use intent::{AssistantAction, FilterCriteria, SortBy, SortOrder};
use sqlx::PgPool;
use tracing::info;

use crate::catalog::{search_products, ProductSummary, SearchArgs};

/// Reply when even the unfiltered catalog has nothing in stock.
pub const NO_STOCK_REPLY: &str =
    "No encontré coincidencias y no hay productos disponibles en este momento.";

/// Run the two relaxation stages and build the substitute reply.
pub async fn recommend(
    message: &str,
    filters: &FilterCriteria,
    pool: &PgPool,
) -> Result<(String, AssistantAction)> {
    let relaxed = relaxed_query(message, &filters.search);
    info!(query = %relaxed, "relaxation stage one");

    let similar = search_products(&SearchArgs::relaxed(relaxed.clone()), pool).await?;
    if !similar.is_empty() {
        let text = format!(
            "No encontré exactos. Opciones similares en stock: {}.",
            join_lines(&similar)
        );
        let action = AssistantAction::ApplyFilters {
            filters: similar_filters(filters, &relaxed),
            open_filters: true,
        };
        return Ok((text, action));
    }

    info!("relaxation stage two");
    let any = search_products(&SearchArgs::relaxed(String::new()), pool).await?;
    let text = if any.is_empty() {
        NO_STOCK_REPLY.to_string()
    } else {
        format!(
            "No encontré coincidencias. Te recomiendo: {}.",
            join_lines(&any)
        )
    };
    let action = AssistantAction::ApplyFilters {
        filters: cleared_filters(),
        open_filters: true,
    };
    Ok((text, action))
}

/// Loosened query text: product-type words from the utterance, else all
/// recognized keywords, else the filter's own search text.
fn relaxed_query(message: &str, search: &str) -> String {
    let keywords = keywords_from_message(message);
    let type_only = product_type_keywords(&keywords).join(" ");
    if !type_only.is_empty() {
        return type_only;
    }
    let all = keywords.join(" ");
    if !all.is_empty() {
        return all;
    }
    search.to_string()
}

fn join_lines(items: &[ProductSummary]) -> String {
    items
        .iter()
        .map(|p| p.compact_line())
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Stage-one filters handed back to the client: category preserved,
/// search loosened, price bounds dropped, stock-first ordering.
fn similar_filters(original: &FilterCriteria, relaxed: &str) -> FilterCriteria {
    FilterCriteria {
        search: relaxed.to_string(),
        category: original.category.clone(),
        min_price: String::new(),
        max_price: String::new(),
        in_stock: true,
        sort_by: SortBy::Stock,
        sort_order: SortOrder::Desc,
    }
}

fn cleared_filters() -> FilterCriteria {
    FilterCriteria {
        in_stock: true,
        sort_by: SortBy::Stock,
        sort_order: SortOrder::Desc,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn summary(name: &str, category: &str, price: f64, stock: i32) -> ProductSummary {
        ProductSummary {
            id: Uuid::nil(),
            name: name.to_string(),
            price,
            stock,
            category: category.to_string(),
            image_url: String::new(),
        }
    }

    #[test]
    fn test_relaxed_query_prefers_product_type_words() {
        let q = relaxed_query("busco anillos dorados baratos", "anillos dorados");
        assert_eq!(q, "anillo");
    }

    #[test]
    fn test_relaxed_query_falls_back_to_all_keywords() {
        let q = relaxed_query("algo dorado con perlas", "dorado perlas");
        assert_eq!(q, "oro dorado perla");
    }

    #[test]
    fn test_relaxed_query_falls_back_to_search_text() {
        let q = relaxed_query("tienes algo bonito?", "regalo");
        assert_eq!(q, "regalo");
    }

    #[test]
    fn test_similar_filters_keep_category_and_drop_prices() {
        let original = FilterCriteria {
            search: "plata".to_string(),
            category: "Collar".to_string(),
            min_price: "50".to_string(),
            max_price: "150".to_string(),
            in_stock: false,
            sort_by: SortBy::Price,
            sort_order: SortOrder::Asc,
        };
        let relaxed = similar_filters(&original, "collar");
        assert_eq!(relaxed.search, "collar");
        assert_eq!(relaxed.category, "Collar");
        assert_eq!(relaxed.min_price, "");
        assert_eq!(relaxed.max_price, "");
        assert!(relaxed.in_stock);
        assert_eq!(relaxed.sort_by, SortBy::Stock);
        assert_eq!(relaxed.sort_order, SortOrder::Desc);
    }

    #[test]
    fn test_cleared_filters_keep_only_stock_ordering() {
        let cleared = cleared_filters();
        assert_eq!(cleared.search, "");
        assert_eq!(cleared.category, "");
        assert_eq!(cleared.min_price, "");
        assert_eq!(cleared.max_price, "");
        assert!(cleared.in_stock);
        assert_eq!(cleared.sort_by, SortBy::Stock);
        assert_eq!(cleared.sort_order, SortOrder::Desc);
    }

    #[test]
    fn test_join_lines_separator() {
        let items = vec![
            summary("Anillo Aurora", "Anillo", 120.0, 5),
            summary("Collar Sol", "Collar", 150.0, 2),
        ];
        assert_eq!(
            join_lines(&items),
            "Anillo Aurora • Anillo $120 (5 en stock) | Collar Sol • Collar $150 (2 en stock)"
        );
    }
}
