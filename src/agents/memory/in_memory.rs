//! In-memory conversation store

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::ConversationStore;
use crate::agents::domain::ConversationSession;
use crate::agents::error::AgentResult;

/// In-memory conversation store; state is lost on restart
#[derive(Default)]
pub struct InMemoryStore {
    sessions: Arc<RwLock<HashMap<String, ConversationSession>>>,
}

impl InMemoryStore {
    /// Create a new in-memory store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConversationStore for InMemoryStore {
    async fn save(&self, session: &ConversationSession) -> AgentResult<()> {
        let mut sessions = self.sessions.write().await;
        sessions.insert(session.thread_id.clone(), session.clone());
        Ok(())
    }

    async fn load(&self, thread_id: &str) -> AgentResult<Option<ConversationSession>> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(thread_id).cloned())
    }
}
