use anyhow::Result;
use chrono::{DateTime, Utc};
use intent::CatalogItem;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Catalog product with its category name resolved
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub stock: i32,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Find the full catalog with category names, newest first
    pub async fn find_all(pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Product>(
            r#"
            SELECT p.id, p.name, p.description, p.price::float8 AS price, p.stock,
                   c.name AS category, p.image_url, p.created_at
            FROM products p
            LEFT JOIN categories c ON c.id = p.category_id
            ORDER BY p.created_at DESC
            "#,
        )
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Find a product by id with its category name
    pub async fn find_by_id(id: Uuid, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Product>(
            r#"
            SELECT p.id, p.name, p.description, p.price::float8 AS price, p.stock,
                   c.name AS category, p.image_url, p.created_at
            FROM products p
            LEFT JOIN categories c ON c.id = p.category_id
            WHERE p.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Current stock for a product, None when the id is unknown
    pub async fn stock_by_id(id: Uuid, pool: &PgPool) -> Result<Option<i32>> {
        sqlx::query_scalar::<_, i32>("SELECT stock FROM products WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }
}

impl CatalogItem for Product {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    fn category(&self) -> &str {
        self.category.as_deref().unwrap_or("")
    }

    fn price(&self) -> f64 {
        self.price
    }

    fn stock(&self) -> i32 {
        self.stock
    }
}

/// Compact search hit handed to the assistant and rendered into
/// recommendation lines. Missing category and image collapse to "".
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProductSummary {
    pub id: Uuid,
    pub name: String,
    pub price: f64,
    pub stock: i32,
    pub category: String,
    pub image_url: String,
}

impl ProductSummary {
    /// One-line rendering like "Anillo Aurora • Anillo $120 (5 en stock)"
    pub fn compact_line(&self) -> String {
        let cat = if self.category.is_empty() {
            String::new()
        } else {
            format!("• {}", self.category)
        };
        let line = format!("{} {} ${} ({} en stock)", self.name, cat, self.price, self.stock);
        line.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn test_compact_line_with_category() {
        let p = summary("Anillo Aurora", "Anillo", 120.0, 5);
        assert_eq!(p.compact_line(), "Anillo Aurora • Anillo $120 (5 en stock)");
    }

    #[test]
    fn test_compact_line_without_category_collapses_spaces() {
        let p = summary("Dije Sol", "", 99.5, 2);
        assert_eq!(p.compact_line(), "Dije Sol $99.5 (2 en stock)");
    }

    #[test]
    fn test_compact_line_whole_prices_have_no_decimals() {
        let p = summary("Pulsera Mar", "Pulsera", 250.0, 1);
        assert_eq!(p.compact_line(), "Pulsera Mar • Pulsera $250 (1 en stock)");
    }

    #[test]
    fn test_catalog_item_defaults_empty_strings() {
        let p = Product {
            id: Uuid::nil(),
            name: "Collar Luna".to_string(),
            description: None,
            price: 85.0,
            stock: 0,
            category: None,
            image_url: None,
            created_at: Utc::now(),
        };
        assert_eq!(CatalogItem::description(&p), "");
        assert_eq!(CatalogItem::category(&p), "");
        assert_eq!(CatalogItem::name(&p), "Collar Luna");
    }
}
