//! Admin notifications, written on checkout and listed in the panel.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Notification {
    pub id: Uuid,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String,
    pub payload: Option<Value>,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Latest notifications first, capped at twenty.
    pub async fn find_recent(pool: &PgPool) -> Result<Vec<Notification>> {
        sqlx::query_as::<_, Notification>(
            r#"
            SELECT id, type, payload, read, created_at
            FROM notifications
            ORDER BY created_at DESC
            LIMIT 20
            "#,
        )
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn record(kind: &str, payload: Value, pool: &PgPool) -> Result<()> {
        sqlx::query("INSERT INTO notifications (type, payload) VALUES ($1, $2)")
            .bind(kind)
            .bind(payload)
            .execute(pool)
            .await?;
        Ok(())
    }

    pub async fn mark_read(id: Uuid, pool: &PgPool) -> Result<()> {
        sqlx::query("UPDATE notifications SET read = true WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }
}
