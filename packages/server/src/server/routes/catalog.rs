//! Catalog read endpoints.
//!
//! `GET /api/products` accepts the same filter fields the storefront keeps
//! in its UI state and applies them in memory over the full catalog, so
//! both sides agree on matching semantics.

use axum::extract::{Extension, Path, Query};
use axum::Json;
use serde_json::{json, Value};
use uuid::Uuid;

use intent::{filter_and_sort, FilterCriteria};

use crate::catalog::{Category, Product};
use crate::error::ApiError;
use crate::server::app::AppState;

pub async fn list_products_handler(
    Extension(state): Extension<AppState>,
    Query(criteria): Query<FilterCriteria>,
) -> Result<Json<Value>, ApiError> {
    let products = Product::find_all(&state.db_pool).await?;
    let products = filter_and_sort(products, &criteria);
    Ok(Json(json!({ "products": products })))
}

pub async fn get_product_handler(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let product = match Uuid::parse_str(id.trim()).ok() {
        Some(id) => Product::find_by_id(id, &state.db_pool).await?,
        None => None,
    };
    match product {
        Some(product) => Ok(Json(json!({ "product": product }))),
        None => Err(ApiError::NotFound("Producto no encontrado".to_string())),
    }
}

pub async fn list_categories_handler(
    Extension(state): Extension<AppState>,
) -> Result<Json<Value>, ApiError> {
    let categories = Category::find_all(&state.db_pool).await?;
    Ok(Json(json!({ "categories": categories })))
}
