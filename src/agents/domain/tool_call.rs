//! Tool call types for agent interactions

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A tool call made by the model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    /// Unique identifier for this tool call
    pub id: String,
    /// Name of the tool being called
    pub name: String,
    /// Arguments passed to the tool (as JSON)
    pub arguments: Value,
}

impl ToolCall {
    /// Create a new tool call
    pub fn new(id: impl Into<String>, name: impl Into<String>, arguments: Value) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            arguments,
        }
    }
}

/// Result of executing a tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCallResult {
    /// ID of the tool call this is responding to
    pub tool_call_id: String,
    /// Name of the tool that was called
    pub tool_name: String,
    /// Input arguments that were passed
    pub input: Value,
    /// Output returned by the tool
    pub output: Value,
    /// Whether the tool execution succeeded
    pub success: bool,
    /// Error message if execution failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ToolCallResult {
    /// Create a successful tool call result
    pub fn success(tool_call_id: String, tool_name: String, input: Value, output: Value) -> Self {
        Self {
            tool_call_id,
            tool_name,
            input,
            output,
            success: true,
            error: None,
        }
    }

    /// Create a failed tool call result
    pub fn failure(tool_call_id: String, tool_name: String, input: Value, error: String) -> Self {
        Self {
            tool_call_id,
            tool_name,
            input,
            output: Value::Null,
            success: false,
            error: Some(error),
        }
    }
}

/// Definition of a tool as presented to the LLM
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Tool name
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// JSON Schema defining the tool's parameters
    pub parameters: Value,
}
