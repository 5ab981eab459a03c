//! Application setup and server configuration.

use std::time::Duration;

use axum::{
    extract::Extension,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Method,
    },
    routing::{get, post},
    Router,
};
use genai_client::GeminiClient;
use sqlx::PgPool;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::server::routes::{
    assistant_handler, get_product_handler, health_handler, list_categories_handler,
    list_notifications_handler, list_products_handler, mark_notification_read_handler,
    place_order_handler,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub genai: GeminiClient,
}

/// Build the Axum application router
pub fn build_app(pool: PgPool, genai: GeminiClient) -> Router {
    let state = AppState {
        db_pool: pool,
        genai,
    };

    // CORS configuration - allow any origin for development
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    Router::new()
        .route("/api/assistant", post(assistant_handler))
        .route("/api/products", get(list_products_handler))
        .route("/api/products/:id", get(get_product_handler))
        .route("/api/categories", get(list_categories_handler))
        .route("/api/orders", post(place_order_handler))
        .route("/api/notifications", get(list_notifications_handler))
        .route(
            "/api/notifications/mark-read",
            post(mark_notification_read_handler),
        )
        .route("/health", get(health_handler))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(Extension(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
