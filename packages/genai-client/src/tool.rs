//! Tool calling traits and types for Gemini function calling.
//!
//! Provides a type-safe, ergonomic API for defining tools that can be called by the model.
//!
//! # Example
//!
//! ```rust,ignore
//! use async_trait::async_trait;
//! use schemars::JsonSchema;
//! use serde::{Deserialize, Serialize};
//! use genai_client::Tool;
//!
//! #[derive(Deserialize, JsonSchema)]
//! struct LookupArgs {
//!     id: String,
//! }
//!
//! #[derive(Serialize)]
//! struct LookupResult {
//!     found: bool,
//! }
//!
//! struct Lookup;
//!
//! #[async_trait]
//! impl Tool for Lookup {
//!     const NAME: &'static str = "lookup";
//!     type Args = LookupArgs;
//!     type Output = LookupResult;
//!     type Error = anyhow::Error;
//!
//!     fn description(&self) -> &str {
//!         "Look up a record by id"
//!     }
//!
//!     async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
//!         Ok(LookupResult { found: args.id == "1" })
//!     }
//! }
//! ```

use async_trait::async_trait;
use schemars::{schema_for, JsonSchema};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// A tool that can be called by the model.
///
/// Tools have typed arguments and outputs, with automatic schema generation.
#[async_trait]
pub trait Tool: Send + Sync {
    /// The unique name of this tool.
    const NAME: &'static str;

    /// The argument type for this tool (must derive `Deserialize` and `JsonSchema`).
    type Args: DeserializeOwned + JsonSchema + Send;

    /// The output type for this tool (must derive `Serialize`).
    type Output: Serialize + Send;

    /// The error type for this tool.
    type Error: std::error::Error + Send + Sync + 'static;

    /// A description of what this tool does.
    fn description(&self) -> &str;

    /// Execute the tool with the given arguments.
    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error>;

    /// Generate the Gemini function declaration for this tool.
    fn declaration(&self) -> FunctionDeclaration {
        FunctionDeclaration {
            name: Self::NAME.to_string(),
            description: self.description().to_string(),
            parameters_json_schema: args_schema::<Self::Args>(),
        }
    }
}

/// Gemini function declaration format.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionDeclaration {
    /// The name of the function.
    pub name: String,

    /// A description of what the function does.
    pub description: String,

    /// JSON schema for the function's arguments.
    pub parameters_json_schema: Value,
}

/// Generate the argument schema for a tool, without the schemars header
/// fields the API has no use for.
fn args_schema<T: JsonSchema>() -> Value {
    let schema = schema_for!(T);
    let mut value = serde_json::to_value(schema).unwrap_or_default();
    if let Value::Object(map) = &mut value {
        map.remove("$schema");
        map.remove("title");
    }
    value
}

/// Type-erased tool for storing heterogeneous tools in collections.
///
/// This allows storing different tool types in the same `Vec<Box<dyn ErasedTool>>`.
#[async_trait]
pub trait ErasedTool: Send + Sync {
    /// Get the tool's name.
    fn name(&self) -> &str;

    /// Get the function declaration.
    fn declaration(&self) -> FunctionDeclaration;

    /// Execute the tool with JSON arguments, returning JSON output.
    async fn call_erased(&self, arguments: Value) -> Result<Value, ToolError>;
}

/// Error type for erased tool calls.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    /// Failed to parse tool arguments.
    #[error("Failed to parse arguments: {0}")]
    ArgumentParse(String),

    /// Tool execution failed.
    #[error("Tool execution failed: {0}")]
    Execution(String),

    /// Failed to serialize tool output.
    #[error("Failed to serialize output: {0}")]
    OutputSerialize(String),
}

/// Blanket implementation of `ErasedTool` for all `Tool` implementors.
#[async_trait]
impl<T: Tool> ErasedTool for T {
    fn name(&self) -> &str {
        T::NAME
    }

    fn declaration(&self) -> FunctionDeclaration {
        Tool::declaration(self)
    }

    async fn call_erased(&self, arguments: Value) -> Result<Value, ToolError> {
        // Models may omit arguments entirely for zero-argument tools.
        let arguments = if arguments.is_null() {
            Value::Object(Default::default())
        } else {
            arguments
        };

        let args: T::Args = serde_json::from_value(arguments)
            .map_err(|e| ToolError::ArgumentParse(e.to_string()))?;

        let output = self
            .call(args)
            .await
            .map_err(|e| ToolError::Execution(e.to_string()))?;

        serde_json::to_value(&output).map_err(|e| ToolError::OutputSerialize(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schemars::JsonSchema;
    use serde::{Deserialize, Serialize};

    #[derive(Deserialize, JsonSchema)]
    struct EchoArgs {
        message: String,
    }

    #[derive(Serialize)]
    struct EchoOutput {
        echoed: String,
    }

    struct EchoTool;

    #[async_trait]
    impl Tool for EchoTool {
        const NAME: &'static str = "echo";
        type Args = EchoArgs;
        type Output = EchoOutput;
        type Error = std::convert::Infallible;

        fn description(&self) -> &str {
            "Echo back the input message"
        }

        async fn call(&self, args: Self::Args) -> std::result::Result<Self::Output, Self::Error> {
            Ok(EchoOutput {
                echoed: args.message,
            })
        }
    }

    #[derive(Deserialize, Default, JsonSchema)]
    #[serde(default)]
    struct NoArgs {}

    #[derive(Serialize)]
    struct Pong {
        ok: bool,
    }

    struct PingTool;

    #[async_trait]
    impl Tool for PingTool {
        const NAME: &'static str = "ping";
        type Args = NoArgs;
        type Output = Pong;
        type Error = std::convert::Infallible;

        fn description(&self) -> &str {
            "Health probe"
        }

        async fn call(&self, _args: Self::Args) -> std::result::Result<Self::Output, Self::Error> {
            Ok(Pong { ok: true })
        }
    }

    #[test]
    fn test_function_declaration() {
        let tool = EchoTool;
        let decl = Tool::declaration(&tool);

        assert_eq!(decl.name, "echo");
        assert_eq!(decl.description, "Echo back the input message");
        assert!(decl.parameters_json_schema.is_object());
        assert!(decl.parameters_json_schema.get("$schema").is_none());
    }

    #[test]
    fn test_declaration_wire_format() {
        let decl = Tool::declaration(&EchoTool);
        let json = serde_json::to_value(&decl).unwrap();

        assert_eq!(json["name"], "echo");
        assert_eq!(json["parametersJsonSchema"]["type"], "object");
        assert!(json["parametersJsonSchema"]["properties"]
            .get("message")
            .is_some());
    }

    #[tokio::test]
    async fn test_erased_tool() {
        let tool: Box<dyn ErasedTool> = Box::new(EchoTool);

        assert_eq!(tool.name(), "echo");

        let result = tool
            .call_erased(serde_json::json!({"message": "test"}))
            .await
            .unwrap();
        assert_eq!(result["echoed"], "test");
    }

    #[tokio::test]
    async fn test_erased_tool_null_args() {
        let tool: Box<dyn ErasedTool> = Box::new(PingTool);

        let result = tool.call_erased(Value::Null).await.unwrap();
        assert_eq!(result["ok"], true);
    }

    #[tokio::test]
    async fn test_erased_tool_bad_args() {
        let tool: Box<dyn ErasedTool> = Box::new(EchoTool);

        let err = tool
            .call_erased(serde_json::json!({"message": 42}))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::ArgumentParse(_)));
    }
}
