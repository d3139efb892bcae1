//! Database-backed conversation store

use async_trait::async_trait;
use sqlx::Row;

use super::ConversationStore;
use crate::agents::domain::ConversationSession;
use crate::agents::error::{AgentError, AgentResult};
use crate::persistence::ConnectionPool;

/// Conversation store persisting one row per thread, with the message
/// history serialized as a JSON column.
pub struct SqlxConversationStore {
    pool: ConnectionPool,
}

impl SqlxConversationStore {
    pub fn new(pool: ConnectionPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConversationStore for SqlxConversationStore {
    async fn save(&self, session: &ConversationSession) -> AgentResult<()> {
        let messages = serde_json::to_string(&session.messages)?;

        let existing = sqlx::query("SELECT thread_id FROM conversations WHERE thread_id = ?")
            .bind(&session.thread_id)
            .fetch_optional(self.pool.pool())
            .await
            .map_err(|e| AgentError::Memory(e.to_string()))?;

        if existing.is_some() {
            sqlx::query("UPDATE conversations SET messages = ?, updated_at = ? WHERE thread_id = ?")
                .bind(&messages)
                .bind(&session.updated_at)
                .bind(&session.thread_id)
                .execute(self.pool.pool())
                .await
                .map_err(|e| AgentError::Memory(e.to_string()))?;
        } else {
            sqlx::query(
                "INSERT INTO conversations (thread_id, user_id, messages, created_at, updated_at) VALUES (?, ?, ?, ?, ?)",
            )
            .bind(&session.thread_id)
            .bind(&session.user_id)
            .bind(&messages)
            .bind(&session.created_at)
            .bind(&session.updated_at)
            .execute(self.pool.pool())
            .await
            .map_err(|e| AgentError::Memory(e.to_string()))?;
        }

        Ok(())
    }

    async fn load(&self, thread_id: &str) -> AgentResult<Option<ConversationSession>> {
        let row = sqlx::query("SELECT * FROM conversations WHERE thread_id = ?")
            .bind(thread_id)
            .fetch_optional(self.pool.pool())
            .await
            .map_err(|e| AgentError::Memory(e.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let messages_str: String = row
            .try_get("messages")
            .map_err(|e| AgentError::Memory(e.to_string()))?;
        let messages = serde_json::from_str(&messages_str)?;

        Ok(Some(ConversationSession {
            thread_id: row
                .try_get("thread_id")
                .map_err(|e| AgentError::Memory(e.to_string()))?,
            user_id: row
                .try_get("user_id")
                .map_err(|e| AgentError::Memory(e.to_string()))?,
            messages,
            created_at: row
                .try_get("created_at")
                .map_err(|e| AgentError::Memory(e.to_string()))?,
            updated_at: row
                .try_get("updated_at")
                .map_err(|e| AgentError::Memory(e.to_string()))?,
        }))
    }
}
