//! Checkout endpoint.

use axum::{extract::Extension, Json};
use serde_json::{json, Value};
use tracing::{error, info};

use crate::error::ApiError;
use crate::notifications::Notification;
use crate::orders::{notification_payload, Order, OrderRequest};
use crate::server::app::AppState;

/// Place an order and record the `new_order` admin notification.
///
/// The notification insert is best effort: a failure there is logged and
/// the checkout still succeeds.
pub async fn place_order_handler(
    Extension(state): Extension<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let request: OrderRequest = serde_json::from_value(body)
        .map_err(|_| ApiError::BadRequest("Datos de pedido inválidos".to_string()))?;
    if !request.is_valid() {
        return Err(ApiError::BadRequest("Datos de pedido inválidos".to_string()));
    }

    let order_id = Order::place(&request, &state.db_pool).await?;
    info!(%order_id, total = request.total_amount(), "order placed");

    let payload = notification_payload(&request, order_id);
    if let Err(err) = Notification::record("new_order", payload, &state.db_pool).await {
        error!(error = %err, %order_id, "failed to record order notification");
    }

    Ok(Json(json!({ "success": true, "orderId": order_id })))
}
