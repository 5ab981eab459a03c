use anyhow::Result;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Product category
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
}

impl Category {
    /// Find all categories ordered by name
    pub async fn find_all(pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Category>("SELECT id, name FROM categories ORDER BY name")
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }

    /// Resolve a category id by case-insensitive exact name.
    ///
    /// Unknown names resolve to None so callers can drop the filter
    /// instead of returning an empty catalog.
    pub async fn resolve_id(name: &str, pool: &PgPool) -> Result<Option<Uuid>> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        sqlx::query_scalar::<_, Uuid>("SELECT id FROM categories WHERE name ILIKE $1 LIMIT 1")
            .bind(trimmed)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }
}
