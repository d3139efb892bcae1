//! Core domain types shared between the agent runtime and the tool surface

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Per-request context carried to tool implementations out of band.
/// The model never supplies these; they come from the chat request.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub user_id: String,
    pub thread_id: String,
}

/// A tool exposed to the agent runtime
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Tool {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

/// Port for executing tools on the agent's behalf.
///
/// Tools must not raise for "not found" conditions reachable through
/// normal conversation; they return an explicit absent/empty result
/// instead. Malformed input is an error the runtime relays to the model.
#[async_trait]
pub trait ToolPort: Send + Sync {
    async fn execute_tool(
        &self,
        name: &str,
        args: Value,
        ctx: &RunContext,
    ) -> anyhow::Result<Value>;

    fn list_tools(&self) -> Vec<Tool>;
}
