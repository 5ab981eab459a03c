//! Conversational assistant endpoint.
//!
//! `POST /api/assistant` with `{"message": "..."}`.

use axum::{extract::Extension, Json};
use serde_json::Value;

use crate::assistant::{respond, AssistantReply};
use crate::error::ApiError;
use crate::server::app::AppState;

pub async fn assistant_handler(
    Extension(state): Extension<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<AssistantReply>, ApiError> {
    let message = body
        .get("message")
        .and_then(Value::as_str)
        .map(str::trim)
        .unwrap_or_default();
    if message.is_empty() {
        return Err(ApiError::BadRequest("Mensaje requerido".to_string()));
    }

    let reply = respond(message, &state.genai, &state.db_pool).await?;
    Ok(Json(reply))
}
