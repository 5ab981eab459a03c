pub mod prompt;
pub mod relax;
pub mod reply;
pub mod respond;
pub mod tools;

// Re-export commonly used types
pub use respond::{respond, AssistantReply};
