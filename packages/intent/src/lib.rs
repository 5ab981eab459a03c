//! Heuristic intent extraction for the storefront assistant.
//!
//! Pure text pipeline with no I/O: normalization and tokenization, keyword
//! rule tables, utterance-to-filter extraction, sanitization of
//! model-proposed actions, and in-memory catalog matching. The server crate
//! wires these into the HTTP surface and the model loop.

pub mod criteria;
pub mod extract;
pub mod matcher;
pub mod rules;
pub mod sanitize;
pub mod text;

pub use criteria::{AssistantAction, FilterCriteria, SortBy, SortOrder};
pub use extract::{infer_filter_action, infer_filter_criteria};
pub use matcher::{filter_and_sort, CatalogItem};
pub use sanitize::sanitize_action;
