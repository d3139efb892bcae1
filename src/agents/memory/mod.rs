//! Conversation checkpointing for the agent runtime
//!
//! Storage backends for per-thread conversation history:
//! - Database (sqlx, the production backend)
//! - In-memory (tests)

mod database;
mod in_memory;
mod strategy;

pub use database::SqlxConversationStore;
pub use in_memory::InMemoryStore;
pub use strategy::sliding_window;

use async_trait::async_trait;

use crate::agents::domain::ConversationSession;
use crate::agents::error::AgentResult;

/// Trait for conversation storage backends
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Save a conversation session (insert or overwrite)
    async fn save(&self, session: &ConversationSession) -> AgentResult<()>;

    /// Load a conversation session by thread id
    async fn load(&self, thread_id: &str) -> AgentResult<Option<ConversationSession>>;

    /// Get or create a session for a thread
    async fn get_or_create(
        &self,
        thread_id: &str,
        user_id: &str,
    ) -> AgentResult<ConversationSession> {
        if let Some(session) = self.load(thread_id).await? {
            Ok(session)
        } else {
            Ok(ConversationSession::new(
                thread_id.to_string(),
                user_id.to_string(),
            ))
        }
    }
}
