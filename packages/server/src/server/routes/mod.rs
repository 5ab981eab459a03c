// HTTP routes
pub mod assistant;
pub mod catalog;
pub mod health;
pub mod notifications;
pub mod orders;

pub use assistant::*;
pub use catalog::*;
pub use health::*;
pub use notifications::*;
pub use orders::*;
