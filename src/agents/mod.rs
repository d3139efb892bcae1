//! Agent runtime for Triage
//!
//! Turns a chat message into tool calls against the ticket service and a
//! final natural-language reply.
//!
//! ## Architecture
//!
//! - `domain/` - Core types (Message, ConversationSession, ToolCall)
//! - `llm/` - LLM provider seam with an OpenAI implementation
//! - `core/` - The tool-calling loop
//! - `memory/` - Conversation checkpointing backends

pub mod core;
pub mod domain;
pub mod error;
pub mod llm;
pub mod memory;

pub use core::ReActAgent;
pub use domain::*;
pub use error::*;
