//! Assistant request orchestration.

use anyhow::Result;
use genai_client::GeminiClient;
use intent::{infer_filter_action, sanitize_action, AssistantAction};
use serde::Serialize;
use sqlx::PgPool;
use tracing::{debug, info};

use super::prompt::{MODEL_FALLBACK, SYSTEM_PROMPT};
use super::relax;
use super::reply::parse_reply;
use super::tools::{CategoriesTool, ProductByIdTool, SearchTool, StockTool};
use crate::catalog::{search_products, SearchArgs};

/// Wire reply for the assistant endpoint. The action is serialized even
/// when absent, as `null`, which is what the storefront expects.
#[derive(Debug, Serialize)]
pub struct AssistantReply {
    pub response: String,
    pub action: Option<AssistantAction>,
}

/// Resolve one utterance end to end: model chat with catalog tools,
/// reply parsing, action sanitization with the heuristic extractor as
/// fallback, then relaxation when the chosen filters match nothing.
pub async fn respond(
    message: &str,
    genai: &GeminiClient,
    pool: &PgPool,
) -> Result<AssistantReply> {
    let agent = genai
        .agent(MODEL_FALLBACK)
        .system(SYSTEM_PROMPT)
        .tool(SearchTool { pool: pool.clone() })
        .tool(ProductByIdTool { pool: pool.clone() })
        .tool(StockTool { pool: pool.clone() })
        .tool(CategoriesTool { pool: pool.clone() })
        .max_rounds(3)
        .temperature(0.2)
        .max_output_tokens(160)
        .build();

    let chat = agent.chat(message).await?;
    debug!(
        rounds = chat.rounds,
        tool_calls = chat.tool_calls_made.len(),
        "assistant chat finished"
    );

    let parsed = parse_reply(&chat.content);
    let mut response = parsed.response;

    let mut action = match parsed.action.as_ref().and_then(sanitize_action) {
        Some(action) => Some(action),
        None => {
            if parsed.action.is_some() {
                debug!("model action rejected by sanitizer, trying heuristics");
            }
            infer_filter_action(message)
        }
    };

    let filters = match &action {
        Some(AssistantAction::ApplyFilters { filters, .. }) => Some(filters.clone()),
        _ => None,
    };
    if let Some(filters) = filters {
        let primary = search_products(&SearchArgs::from_criteria(&filters), pool).await?;
        if primary.is_empty() {
            info!(search = %filters.search, "primary filter query empty, relaxing");
            let (text, relaxed_action) = relax::recommend(message, &filters, pool).await?;
            response = text;
            action = Some(relaxed_action);
        }
    }

    Ok(AssistantReply { response, action })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn lazy_pool() -> PgPool {
        PgPool::connect_lazy("postgres://localhost/unused").unwrap()
    }

    fn model_body(text: &str) -> String {
        json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": text}]}
            }]
        })
        .to_string()
    }

    // Small-talk messages carry no catalog intent, so the reply passes
    // through without touching the database.
    #[tokio::test]
    async fn test_respond_passes_through_model_reply() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1beta/models/gemini-2.5-flash:generateContent")
            .with_status(200)
            .with_body(model_body(r#"{"response":"Hola, ¿qué estás buscando?"}"#))
            .expect(1)
            .create_async()
            .await;

        let client = GeminiClient::new("test-key").with_base_url(server.url());
        let reply = respond("hola", &client, &lazy_pool()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(reply.response, "Hola, ¿qué estás buscando?");
        assert!(reply.action.is_none());
    }

    #[tokio::test]
    async fn test_respond_advances_to_next_model_on_rate_limit() {
        let mut server = mockito::Server::new_async().await;
        let flash = server
            .mock("POST", "/v1beta/models/gemini-2.5-flash:generateContent")
            .with_status(429)
            .with_body("rate limited")
            .expect(1)
            .create_async()
            .await;
        let pro = server
            .mock("POST", "/v1beta/models/gemini-2.5-pro:generateContent")
            .with_status(200)
            .with_body(model_body(r#"{"response":"Claro, dime más."}"#))
            .expect(1)
            .create_async()
            .await;

        let client = GeminiClient::new("test-key").with_base_url(server.url());
        let reply = respond("gracias", &client, &lazy_pool()).await.unwrap();

        flash.assert_async().await;
        pro.assert_async().await;
        assert_eq!(reply.response, "Claro, dime más.");
        assert!(reply.action.is_none());
    }

    #[tokio::test]
    async fn test_respond_recovers_fenced_reply() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1beta/models/gemini-2.5-flash:generateContent")
            .with_status(200)
            .with_body(model_body(
                "```json\n{\"response\":\"Con gusto te ayudo.\"}\n```",
            ))
            .create_async()
            .await;

        let client = GeminiClient::new("test-key").with_base_url(server.url());
        let reply = respond("buenos días", &client, &lazy_pool()).await.unwrap();

        assert_eq!(reply.response, "Con gusto te ayudo.");
    }
}
