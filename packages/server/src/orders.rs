//! Checkout orders and their admin notification payloads.

use anyhow::Result;
use serde::Deserialize;
use serde_json::{json, Value};
use sqlx::PgPool;
use uuid::Uuid;

/// Checkout payload sent by the storefront.
///
/// `items` stays optional so a request without the field can be told
/// apart from an explicitly empty cart; validation rejects the former.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub items: Option<Vec<OrderItemRequest>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemRequest {
    pub product_id: Option<Uuid>,
    #[serde(default)]
    pub product_name: String,
    #[serde(default)]
    pub quantity: i32,
    #[serde(default)]
    pub price: f64,
}

impl OrderRequest {
    /// Name, email and an items array must all be present.
    pub fn is_valid(&self) -> bool {
        !self.customer_name.is_empty() && !self.customer_email.is_empty() && self.items.is_some()
    }

    pub fn total_amount(&self) -> f64 {
        self.items
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|item| item.price * item.quantity as f64)
            .sum()
    }
}

pub struct Order;

impl Order {
    /// Insert the order and its items in one transaction, returning the
    /// new order id. Orders start in status `pending`.
    pub async fn place(request: &OrderRequest, pool: &PgPool) -> Result<Uuid> {
        let items = request.items.as_deref().unwrap_or_default();
        let mut tx = pool.begin().await?;

        let order_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO orders (customer_name, customer_email, customer_phone, total_amount, status)
            VALUES ($1, $2, $3, $4::float8, 'pending')
            RETURNING id
            "#,
        )
        .bind(&request.customer_name)
        .bind(&request.customer_email)
        .bind(&request.customer_phone)
        .bind(request.total_amount())
        .fetch_one(&mut *tx)
        .await?;

        for item in items {
            sqlx::query(
                r#"
                INSERT INTO order_items (order_id, product_id, product_name, quantity, price)
                VALUES ($1, $2, $3, $4, $5::float8)
                "#,
            )
            .bind(order_id)
            .bind(item.product_id)
            .bind(&item.product_name)
            .bind(item.quantity)
            .bind(item.price)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(order_id)
    }
}

/// Payload stored on the `new_order` admin notification. Field casing is
/// what the admin panel reads: `orderId` camelCase, the rest snake_case.
pub fn notification_payload(request: &OrderRequest, order_id: Uuid) -> Value {
    let items: Vec<Value> = request
        .items
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(|item| {
            json!({
                "order_id": order_id,
                "product_id": item.product_id,
                "product_name": item.product_name,
                "quantity": item.quantity,
                "price": item.price,
            })
        })
        .collect();

    json!({
        "orderId": order_id,
        "customer_name": request.customer_name,
        "customer_email": request.customer_email,
        "total_amount": request.total_amount(),
        "items": items,
    })
}
