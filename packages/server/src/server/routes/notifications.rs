//! Admin notification endpoints.

use axum::{extract::Extension, Json};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::ApiError;
use crate::notifications::Notification;
use crate::server::app::AppState;

pub async fn list_notifications_handler(
    Extension(state): Extension<AppState>,
) -> Result<Json<Value>, ApiError> {
    let notifications = Notification::find_recent(&state.db_pool).await?;
    Ok(Json(json!({ "notifications": notifications })))
}

pub async fn mark_notification_read_handler(
    Extension(state): Extension<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let id = body
        .get("id")
        .and_then(Value::as_str)
        .map(str::trim)
        .and_then(|raw| Uuid::parse_str(raw).ok())
        .ok_or_else(|| ApiError::BadRequest("Falta id".to_string()))?;

    Notification::mark_read(id, &state.db_pool).await?;
    Ok(Json(json!({ "success": true })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use genai_client::GeminiClient;
    use sqlx::PgPool;

    fn state() -> Extension<AppState> {
        Extension(AppState {
            db_pool: PgPool::connect_lazy("postgres://localhost/unused").unwrap(),
            genai: GeminiClient::new("test-key"),
        })
    }

    #[tokio::test]
    async fn test_missing_id_is_rejected() {
        let err = mark_notification_read_handler(state(), Json(json!({})))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(msg) if msg == "Falta id"));
    }

    #[tokio::test]
    async fn test_malformed_id_is_rejected() {
        let body = json!({ "id": "not-a-uuid" });
        let err = mark_notification_read_handler(state(), Json(body))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_numeric_id_is_rejected() {
        let body = json!({ "id": 42 });
        let err = mark_notification_read_handler(state(), Json(body))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }
}
