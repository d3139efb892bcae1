//! Error types for the agent runtime

use thiserror::Error;

/// Errors that can occur during agent execution
#[derive(Debug, Error)]
pub enum AgentError {
    /// LLM provider error
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    /// Memory/persistence error
    #[error("Memory error: {0}")]
    Memory(String),

    /// Max iterations reached without a final answer
    #[error("Max iterations ({0}) reached without completion")]
    MaxIterations(u32),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Errors specific to LLM provider operations
#[derive(Debug, Error)]
pub enum LlmError {
    /// API error
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Authentication error
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Network error
    #[error("Network error: {0}")]
    Network(String),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Timeout
    #[error("Request timed out")]
    Timeout,
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LlmError::Timeout
        } else if err.is_connect() {
            LlmError::Network(format!("Connection error: {}", err))
        } else {
            LlmError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AgentError {
    fn from(err: serde_json::Error) -> Self {
        AgentError::Serialization(err.to_string())
    }
}

/// Result type alias for agent operations
pub type AgentResult<T> = Result<T, AgentError>;

/// Result type alias for LLM operations
pub type LlmResult<T> = Result<T, LlmError>;
