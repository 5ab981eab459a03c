//! Catalog search used by the assistant tools and the relaxation flow.
//!
//! Free-text terms are matched with ILIKE against name and description.
//! A term list is OR-ed as a whole, so any term can hit either column.

use anyhow::Result;
use intent::text::{normalize, tokenize};
use intent::{FilterCriteria, SortBy, SortOrder};
use sqlx::PgPool;

use super::category::Category;
use super::product::ProductSummary;

/// Parameters accepted by the catalog search
#[derive(Debug, Clone, Default)]
pub struct SearchArgs {
    pub query: String,
    pub category_name: String,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub in_stock: bool,
    pub sort_by: SortBy,
    pub sort_order: SortOrder,
    pub limit: Option<i64>,
}

impl SearchArgs {
    /// Search matching a storefront filter set, limited to 3 hits
    pub fn from_criteria(criteria: &FilterCriteria) -> Self {
        Self {
            query: criteria.search.clone(),
            category_name: criteria.category.clone(),
            min_price: criteria.min_price_value(),
            max_price: criteria.max_price_value(),
            in_stock: criteria.in_stock,
            sort_by: criteria.sort_by,
            sort_order: criteria.sort_order,
            limit: Some(3),
        }
    }

    /// Relaxed search: in-stock items for a looser query, best stocked first
    pub fn relaxed(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            in_stock: true,
            sort_by: SortBy::Stock,
            sort_order: SortOrder::Desc,
            limit: Some(3),
            ..Default::default()
        }
    }

    fn clamped_limit(&self) -> i64 {
        self.limit.unwrap_or(3).clamp(1, 6)
    }
}

/// Up to four search terms for the ILIKE group.
///
/// When every word is a stopword the whole normalized query becomes the
/// single term, so "de la" still matches a product named that way.
fn ilike_terms(query: &str) -> Vec<String> {
    let tokens: Vec<String> = tokenize(query).into_iter().take(4).collect();
    let terms = if tokens.is_empty() {
        vec![normalize(query)]
    } else {
        tokens
    };
    terms.into_iter().filter(|t| !t.is_empty()).collect()
}

/// Sort keys map to fixed column expressions. Category has no sortable
/// column on products, so it falls back to newest first.
fn order_clause(sort_by: SortBy, sort_order: SortOrder) -> &'static str {
    match (sort_by, sort_order) {
        (SortBy::Category, _) => "p.created_at DESC",
        (SortBy::Name, SortOrder::Asc) => "p.name ASC",
        (SortBy::Name, SortOrder::Desc) => "p.name DESC",
        (SortBy::Price, SortOrder::Asc) => "p.price ASC",
        (SortBy::Price, SortOrder::Desc) => "p.price DESC",
        (SortBy::Stock, SortOrder::Asc) => "p.stock ASC",
        (SortBy::Stock, SortOrder::Desc) => "p.stock DESC",
    }
}

/// Run a catalog search.
///
/// An unknown category name drops the category filter rather than
/// forcing zero results.
pub async fn search_products(args: &SearchArgs, pool: &PgPool) -> Result<Vec<ProductSummary>> {
    let terms = ilike_terms(&args.query);
    let term = |i: usize| terms.get(i).map(String::as_str);

    let category_id = Category::resolve_id(&args.category_name, pool).await?;
    let min_price = args.min_price.filter(|p| p.is_finite());
    let max_price = args.max_price.filter(|p| p.is_finite());

    let sql = format!(
        r#"
        SELECT p.id, p.name, p.price::float8 AS price, p.stock,
               COALESCE(c.name, '') AS category,
               COALESCE(p.image_url, '') AS image_url
        FROM products p
        LEFT JOIN categories c ON c.id = p.category_id
        WHERE (
                ($1::text IS NULL AND $2::text IS NULL AND $3::text IS NULL AND $4::text IS NULL)
                OR p.name ILIKE '%' || $1 || '%' OR p.description ILIKE '%' || $1 || '%'
                OR p.name ILIKE '%' || $2 || '%' OR p.description ILIKE '%' || $2 || '%'
                OR p.name ILIKE '%' || $3 || '%' OR p.description ILIKE '%' || $3 || '%'
                OR p.name ILIKE '%' || $4 || '%' OR p.description ILIKE '%' || $4 || '%'
              )
          AND ($5::uuid IS NULL OR p.category_id = $5)
          AND ($6::float8 IS NULL OR p.price >= $6)
          AND ($7::float8 IS NULL OR p.price <= $7)
          AND (NOT $8 OR p.stock > 0)
        ORDER BY {}
        LIMIT $9
        "#,
        order_clause(args.sort_by, args.sort_order)
    );

    sqlx::query_as::<_, ProductSummary>(&sql)
        .bind(term(0))
        .bind(term(1))
        .bind(term(2))
        .bind(term(3))
        .bind(category_id)
        .bind(min_price)
        .bind(max_price)
        .bind(args.in_stock)
        .bind(args.clamped_limit())
        .fetch_all(pool)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ilike_terms_tokenizes_and_singularizes() {
        assert_eq!(ilike_terms("anillos de plata"), vec!["anillo", "plata"]);
    }

    #[test]
    fn test_ilike_terms_falls_back_to_whole_query() {
        assert_eq!(ilike_terms("de la"), vec!["de la"]);
    }

    #[test]
    fn test_ilike_terms_empty_query_yields_no_terms() {
        assert!(ilike_terms("").is_empty());
        assert!(ilike_terms("   ").is_empty());
    }

    #[test]
    fn test_ilike_terms_caps_at_four() {
        let terms = ilike_terms("anillo collar pulsera arete cadena");
        assert_eq!(terms, vec!["anillo", "collar", "pulsera", "arete"]);
    }

    #[test]
    fn test_order_clause_category_uses_recency() {
        assert_eq!(order_clause(SortBy::Category, SortOrder::Asc), "p.created_at DESC");
        assert_eq!(order_clause(SortBy::Category, SortOrder::Desc), "p.created_at DESC");
    }

    #[test]
    fn test_order_clause_direct_columns() {
        assert_eq!(order_clause(SortBy::Name, SortOrder::Asc), "p.name ASC");
        assert_eq!(order_clause(SortBy::Price, SortOrder::Desc), "p.price DESC");
        assert_eq!(order_clause(SortBy::Stock, SortOrder::Desc), "p.stock DESC");
    }

    #[test]
    fn test_limit_clamps_between_one_and_six() {
        let mut args = SearchArgs::default();
        assert_eq!(args.clamped_limit(), 3);
        args.limit = Some(0);
        assert_eq!(args.clamped_limit(), 1);
        args.limit = Some(-2);
        assert_eq!(args.clamped_limit(), 1);
        args.limit = Some(10);
        assert_eq!(args.clamped_limit(), 6);
        args.limit = Some(5);
        assert_eq!(args.clamped_limit(), 5);
    }

    #[test]
    fn test_from_criteria_parses_price_bounds() {
        let criteria = FilterCriteria {
            search: "plata".to_string(),
            category: "Collar".to_string(),
            max_price: "100".to_string(),
            in_stock: true,
            sort_by: SortBy::Price,
            sort_order: SortOrder::Desc,
            ..Default::default()
        };
        let args = SearchArgs::from_criteria(&criteria);
        assert_eq!(args.query, "plata");
        assert_eq!(args.category_name, "Collar");
        assert_eq!(args.min_price, None);
        assert_eq!(args.max_price, Some(100.0));
        assert!(args.in_stock);
        assert_eq!(args.sort_by, SortBy::Price);
        assert_eq!(args.limit, Some(3));
    }

    #[test]
    fn test_relaxed_search_prefers_stock() {
        let args = SearchArgs::relaxed("collar");
        assert_eq!(args.query, "collar");
        assert_eq!(args.category_name, "");
        assert!(args.in_stock);
        assert_eq!(args.sort_by, SortBy::Stock);
        assert_eq!(args.sort_order, SortOrder::Desc);
        assert_eq!(args.limit, Some(3));
    }
}
