pub mod category;
pub mod product;
pub mod search;

// Re-export commonly used types
pub use category::Category;
pub use product::{Product, ProductSummary};
pub use search::{search_products, SearchArgs};
