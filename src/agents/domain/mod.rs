//! Core types for the agent runtime

mod message;
mod tool_call;

pub use message::{ConversationSession, Message, Role};
pub use tool_call::{ToolCall, ToolCallResult, ToolDefinition};

use serde::{Deserialize, Serialize};

/// Final response from an agent execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentResponse {
    /// The agent's final natural-language reply
    pub message: String,
    /// Tool calls made during execution (if any)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolCallResult>,
    /// Number of model round-trips taken
    pub iterations: u32,
}
