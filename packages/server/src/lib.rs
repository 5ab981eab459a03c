// Brillo Joyas - Storefront API Core
//
// Backend for the jewelry storefront: catalog queries, checkout orders,
// admin notifications, and the conversational assistant that turns
// customer messages into catalog filters via Gemini tool calling.

pub mod assistant;
pub mod catalog;
pub mod config;
pub mod error;
pub mod notifications;
pub mod orders;
pub mod server;

pub use config::*;
pub use error::ApiError;
