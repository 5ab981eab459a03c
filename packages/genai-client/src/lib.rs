//! Pure Gemini REST API client
//!
//! A clean, minimal client for the Gemini `generateContent` API with no
//! domain-specific logic. Supports text generation, function calling, and
//! ordered model fallback for rate-limited or unavailable models.
//!
//! # Example
//!
//! ```rust,ignore
//! use genai_client::{Content, GeminiClient, GenerateRequest};
//!
//! let client = GeminiClient::from_env()?;
//!
//! let response = client
//!     .generate_content("gemini-2.5-flash", &GenerateRequest {
//!         contents: vec![Content::user("Hola")],
//!         ..Default::default()
//!     })
//!     .await?;
//! println!("{}", response.text());
//! ```
//!
//! # Agent with Tools
//!
//! ```rust,ignore
//! let response = client
//!     .agent(["gemini-2.5-flash", "gemini-2.5-pro"])
//!     .system("You are a shop assistant")
//!     .tool(SearchCatalog)
//!     .build()
//!     .chat("do you have rings?")
//!     .await?;
//! ```

pub mod agent;
pub mod error;
pub mod tool;
pub mod types;

pub use agent::{Agent, AgentBuilder, AgentResponse};
pub use error::{GenAiError, Result};
pub use tool::{ErasedTool, FunctionDeclaration, Tool, ToolError};
pub use types::*;

use reqwest::Client;
use tracing::{debug, warn};

/// Default public endpoint for the Gemini API.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Pure Gemini API client.
#[derive(Clone)]
pub struct GeminiClient {
    http_client: Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    /// Create a new Gemini client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Create from environment variable `GEMINI_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| GenAiError::Config("GEMINI_API_KEY not set".into()))?;
        Ok(Self::new(api_key))
    }

    /// Set a custom base URL (for proxies and tests).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create an agent builder over an ordered model fallback list.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let response = client
    ///     .agent(["gemini-2.5-flash", "gemini-2.5-pro"])
    ///     .system("You are a helpful assistant")
    ///     .tool(MyTool)
    ///     .build()
    ///     .chat("Hello!")
    ///     .await?;
    /// ```
    pub fn agent<I, S>(&self, models: I) -> AgentBuilder<'_>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        AgentBuilder::new(self, models)
    }

    /// Single `generateContent` call against one model.
    pub async fn generate_content(
        &self,
        model: &str,
        request: &GenerateRequest,
    ) -> Result<GenerateResponse> {
        let start = std::time::Instant::now();

        let response = self
            .http_client
            .post(format!(
                "{}/v1beta/models/{}:generateContent",
                self.base_url, model
            ))
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Gemini request failed");
                GenAiError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "Gemini API error");
            return Err(GenAiError::Api {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| GenAiError::Parse(e.to_string()))?;

        debug!(
            model = %model,
            duration_ms = start.elapsed().as_millis(),
            "Gemini generateContent"
        );

        Ok(body)
    }

    /// Send one request, trying each model in order.
    ///
    /// Rate-limit (429) and unknown-model (404) responses advance to the
    /// next model; any other failure aborts immediately. When every model
    /// fails, the last error is returned. Models are tried strictly in
    /// sequence, never concurrently.
    pub async fn generate_with_fallback(
        &self,
        models: &[String],
        request: &GenerateRequest,
    ) -> Result<GenerateResponse> {
        let mut last_error: Option<GenAiError> = None;

        for model in models {
            match self.generate_content(model, request).await {
                Ok(response) => return Ok(response),
                Err(e) if e.is_model_unavailable() => {
                    warn!(model = %model, error = %e, "model unavailable, trying next");
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error.unwrap_or_else(|| GenAiError::Config("no models configured".into())))
    }
}
