//! Agent with automatic function-calling loop and ordered model fallback.
//!
//! Provides a high-level API for building assistants that can use tools.
//!
//! # Example
//!
//! ```rust,ignore
//! use genai_client::GeminiClient;
//!
//! let response = client
//!     .agent(["gemini-2.5-flash", "gemini-2.5-pro"])
//!     .system("You are a shop assistant")
//!     .tool(SearchCatalog)
//!     .max_rounds(3)
//!     .temperature(0.2)
//!     .build()
//!     .chat("do you have rings in stock?")
//!     .await?;
//! ```

use crate::tool::{ErasedTool, FunctionDeclaration, Tool};
use crate::types::{Content, FunctionCall, GenerateRequest, GenerationConfig, ToolConfig};
use crate::{GeminiClient, Result};
use serde_json::Value;
use tracing::{debug, info, warn};

/// Builder for creating an Agent.
pub struct AgentBuilder<'a> {
    client: &'a GeminiClient,
    models: Vec<String>,
    system_instruction: Option<String>,
    tools: Vec<Box<dyn ErasedTool>>,
    max_rounds: usize,
    temperature: Option<f32>,
    max_output_tokens: Option<u32>,
}

impl<'a> AgentBuilder<'a> {
    /// Create a new agent builder over an ordered model list.
    pub(crate) fn new<I, S>(client: &'a GeminiClient, models: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            client,
            models: models.into_iter().map(Into::into).collect(),
            system_instruction: None,
            tools: Vec::new(),
            max_rounds: 3,
            temperature: None,
            max_output_tokens: None,
        }
    }

    /// Set the system instruction.
    pub fn system(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    /// Add a tool to the agent.
    pub fn tool<T: Tool + 'static>(mut self, tool: T) -> Self {
        self.tools.push(Box::new(tool));
        self
    }

    /// Set the maximum number of model rounds.
    ///
    /// Default is 3. When the model is still requesting function calls at
    /// the bound, the agent stops and returns whatever text it last saw
    /// (possibly empty) instead of erroring.
    pub fn max_rounds(mut self, max: usize) -> Self {
        self.max_rounds = max;
        self
    }

    /// Set the sampling temperature.
    pub fn temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp);
        self
    }

    /// Cap the output token count.
    pub fn max_output_tokens(mut self, max: u32) -> Self {
        self.max_output_tokens = Some(max);
        self
    }

    /// Build the agent.
    pub fn build(self) -> Agent<'a> {
        Agent {
            client: self.client,
            models: self.models,
            system_instruction: self.system_instruction,
            tools: self.tools,
            max_rounds: self.max_rounds,
            temperature: self.temperature,
            max_output_tokens: self.max_output_tokens,
        }
    }
}

/// An assistant that can call tools to answer a message.
pub struct Agent<'a> {
    client: &'a GeminiClient,
    models: Vec<String>,
    system_instruction: Option<String>,
    tools: Vec<Box<dyn ErasedTool>>,
    max_rounds: usize,
    temperature: Option<f32>,
    max_output_tokens: Option<u32>,
}

/// Response from an agent chat.
#[derive(Debug)]
pub struct AgentResponse {
    /// The final text response, empty when the round bound was hit
    /// before the model produced one.
    pub content: String,

    /// The function calls that were made during the conversation.
    pub tool_calls_made: Vec<String>,

    /// Number of model rounds used.
    pub rounds: usize,
}

impl<'a> Agent<'a> {
    /// Send a message to the agent and get a response.
    ///
    /// Handles the function-calling loop automatically:
    /// 1. Send the conversation to the first available model
    /// 2. If the model requests function calls, execute them
    /// 3. Append call and result turns to the history
    /// 4. Repeat until the model responds with text or the round bound hits
    pub async fn chat(&self, user_message: impl Into<String>) -> Result<AgentResponse> {
        let contents = vec![Content::user(user_message)];
        self.run_tool_loop(contents).await
    }

    /// Core function-calling loop.
    ///
    /// History is an explicit accumulator: each round may append a model
    /// call turn and a result turn per requested function, never mutating
    /// anything outside this frame.
    async fn run_tool_loop(&self, mut contents: Vec<Content>) -> Result<AgentResponse> {
        let mut tool_calls_made = Vec::new();
        let mut rounds = 0;
        let mut last_text = String::new();

        let declarations: Vec<FunctionDeclaration> =
            self.tools.iter().map(|t| t.declaration()).collect();

        while rounds < self.max_rounds {
            rounds += 1;

            info!(
                round = rounds,
                message_count = contents.len(),
                tool_count = self.tools.len(),
                "agent round starting"
            );

            let request = GenerateRequest {
                system_instruction: self
                    .system_instruction
                    .as_deref()
                    .map(Content::system),
                contents: contents.clone(),
                generation_config: Some(GenerationConfig {
                    temperature: self.temperature,
                    max_output_tokens: self.max_output_tokens,
                }),
                tools: if declarations.is_empty() {
                    Vec::new()
                } else {
                    vec![ToolConfig {
                        function_declarations: declarations.clone(),
                    }]
                },
            };

            let response = self
                .client
                .generate_with_fallback(&self.models, &request)
                .await?;

            let calls = response.function_calls();
            if calls.is_empty() {
                last_text = response.text();
                debug!(response_len = last_text.len(), "agent final response");
                break;
            }

            info!(
                round = rounds,
                call_count = calls.len(),
                "agent received function calls"
            );

            for call in calls {
                tool_calls_made.push(call.name.clone());
                let result = self.execute_tool(&call).await?;
                debug!(
                    tool = %call.name,
                    result_preview = %truncate_for_log(&result.to_string(), 200),
                    "function executed"
                );
                contents.push(Content::model_call(call.clone()));
                contents.push(Content::function_result(call.name, result));
            }
        }

        info!(
            rounds,
            tool_calls_total = tool_calls_made.len(),
            "agent finished"
        );

        Ok(AgentResponse {
            content: last_text,
            tool_calls_made,
            rounds,
        })
    }

    /// Execute a single function call.
    ///
    /// An unknown name is reported back to the model as an error payload so
    /// it can re-plan; a failure inside a known tool propagates.
    async fn execute_tool(&self, call: &FunctionCall) -> Result<Value> {
        let Some(tool) = self.tools.iter().find(|t| t.name() == call.name) else {
            warn!(tool = %call.name, "unknown tool requested");
            return Ok(serde_json::json!({
                "error": format!("unknown tool '{}'", call.name)
            }));
        };

        Ok(tool.call_erased(call.args.clone()).await?)
    }
}

/// Truncate a string for logging purposes.
fn truncate_for_log(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!(
            "{}...[truncated {} chars]",
            &s[..max_len],
            s.len() - max_len
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use schemars::JsonSchema;
    use serde::{Deserialize, Serialize};

    #[derive(Deserialize, JsonSchema)]
    struct AddArgs {
        a: i32,
        b: i32,
    }

    #[derive(Serialize)]
    struct AddResult {
        sum: i32,
    }

    struct Calculator;

    #[async_trait]
    impl Tool for Calculator {
        const NAME: &'static str = "add";
        type Args = AddArgs;
        type Output = AddResult;
        type Error = std::convert::Infallible;

        fn description(&self) -> &str {
            "Add two numbers together"
        }

        async fn call(&self, args: Self::Args) -> std::result::Result<Self::Output, Self::Error> {
            Ok(AddResult {
                sum: args.a + args.b,
            })
        }
    }

    #[test]
    fn test_agent_builder() {
        let client = GeminiClient::new("test-key");
        let agent = client
            .agent(["model-a", "model-b"])
            .system("You are a helpful assistant")
            .tool(Calculator)
            .max_rounds(3)
            .temperature(0.2)
            .max_output_tokens(160)
            .build();

        assert_eq!(agent.models, vec!["model-a", "model-b"]);
        assert_eq!(agent.tools.len(), 1);
        assert_eq!(agent.tools[0].name(), "add");
    }

    #[tokio::test]
    async fn test_unknown_tool_reported_to_model() {
        let client = GeminiClient::new("test-key");
        let agent = client.agent(["model-a"]).tool(Calculator).build();

        let call = FunctionCall {
            name: "subtract".to_string(),
            args: serde_json::json!({}),
        };
        let result = agent.execute_tool(&call).await.unwrap();
        assert_eq!(result["error"], "unknown tool 'subtract'");
    }

    #[tokio::test]
    async fn test_known_tool_executes() {
        let client = GeminiClient::new("test-key");
        let agent = client.agent(["model-a"]).tool(Calculator).build();

        let call = FunctionCall {
            name: "add".to_string(),
            args: serde_json::json!({"a": 2, "b": 3}),
        };
        let result = agent.execute_tool(&call).await.unwrap();
        assert_eq!(result["sum"], 5);
    }
}
