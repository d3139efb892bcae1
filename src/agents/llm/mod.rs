//! LLM provider interface
//!
//! A unified seam for chat-completion backends. The shipped provider is
//! OpenAI-compatible (`openai.rs`); tests substitute scripted providers
//! through the same trait.

mod openai;

pub use openai::OpenAiProvider;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::agents::domain::{Message, ToolDefinition};
use crate::agents::error::LlmResult;

/// Trait for LLM providers
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Get the provider name
    fn name(&self) -> &str;

    /// Get the model being used
    fn model(&self) -> &str;

    /// Complete a request
    async fn complete(&self, request: CompletionRequest) -> LlmResult<CompletionResponse>;
}

/// Request for LLM completion
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CompletionRequest {
    /// Messages in the conversation
    pub messages: Vec<Message>,
    /// Temperature for sampling
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Maximum tokens to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Tools available for calling
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ToolDefinition>>,
}

/// Response from LLM completion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// Generated message
    pub message: Message,
    /// Reason the completion stopped
    pub finish_reason: FinishReason,
    /// Token usage
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<TokenUsage>,
}

/// Reason completion stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    /// Natural stop
    Stop,
    /// Hit max tokens
    Length,
    /// Tool call requested
    ToolCalls,
    /// Content filtered
    ContentFilter,
}

/// Token usage information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}
