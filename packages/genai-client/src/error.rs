//! Error types for the Gemini client.

use thiserror::Error;

use crate::tool::ToolError;

/// Result type for Gemini client operations.
pub type Result<T> = std::result::Result<T, GenAiError>;

/// Gemini client errors.
#[derive(Debug, Error)]
pub enum GenAiError {
    /// Configuration error (missing API key, invalid settings)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network error (connection failed, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// API error (non-2xx response); carries the HTTP status so callers
    /// can tell rate-limit and unknown-model failures apart
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Parse error (invalid JSON, unexpected response format)
    #[error("Parse error: {0}")]
    Parse(String),

    /// A requested tool failed while executing
    #[error(transparent)]
    Tool(#[from] ToolError),
}

impl GenAiError {
    /// True when the failure is per-model rather than per-request:
    /// rate limited (429) or model not found (404). Callers running an
    /// ordered fallback list move on to the next model for these.
    pub fn is_model_unavailable(&self) -> bool {
        matches!(
            self,
            GenAiError::Api {
                status: 429 | 404,
                ..
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_unavailable_classification() {
        let rate_limited = GenAiError::Api {
            status: 429,
            message: "quota exceeded".into(),
        };
        let not_found = GenAiError::Api {
            status: 404,
            message: "unknown model".into(),
        };
        let bad_request = GenAiError::Api {
            status: 400,
            message: "invalid".into(),
        };

        assert!(rate_limited.is_model_unavailable());
        assert!(not_found.is_model_unavailable());
        assert!(!bad_request.is_model_unavailable());
        assert!(!GenAiError::Network("timeout".into()).is_model_unavailable());
    }
}
