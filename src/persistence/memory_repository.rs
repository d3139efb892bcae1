//! Repository for long-term user memories
//!
//! A flat key/value store per user, used by the agent to recall facts
//! across conversations (the canonical example being the user's name).

use crate::persistence::error::PersistenceError;
use crate::persistence::models::UserMemory;
use crate::persistence::pool::ConnectionPool;
use async_trait::async_trait;
use sqlx::Row;

/// Repository trait for user memory operations
#[async_trait]
pub trait MemoryRepository: Send + Sync {
    /// Store or overwrite a memory for a user
    async fn upsert(&self, user_id: &str, key: &str, value: &str)
        -> Result<(), PersistenceError>;

    /// All memories for a user, most recently updated first.
    /// Empty when none exist.
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<UserMemory>, PersistenceError>;
}

/// SQLx-based implementation of `MemoryRepository`
pub struct SqlxMemoryRepository {
    pool: ConnectionPool,
}

impl SqlxMemoryRepository {
    pub fn new(pool: ConnectionPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MemoryRepository for SqlxMemoryRepository {
    async fn upsert(
        &self,
        user_id: &str,
        key: &str,
        value: &str,
    ) -> Result<(), PersistenceError> {
        let now = chrono::Utc::now().to_rfc3339();

        let mut tx = self.pool.pool().begin().await?;

        // Select-then-write keeps the SQL portable across backends
        let existing = sqlx::query("SELECT user_id FROM user_memories WHERE user_id = ? AND key = ?")
            .bind(user_id)
            .bind(key)
            .fetch_optional(&mut *tx)
            .await?;

        if existing.is_some() {
            sqlx::query(
                "UPDATE user_memories SET value = ?, updated_at = ? WHERE user_id = ? AND key = ?",
            )
            .bind(value)
            .bind(&now)
            .bind(user_id)
            .bind(key)
            .execute(&mut *tx)
            .await?;
        } else {
            sqlx::query(
                "INSERT INTO user_memories (user_id, key, value, updated_at) VALUES (?, ?, ?, ?)",
            )
            .bind(user_id)
            .bind(key)
            .bind(value)
            .bind(&now)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(())
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<UserMemory>, PersistenceError> {
        let rows = sqlx::query(
            "SELECT key, value, updated_at FROM user_memories WHERE user_id = ? ORDER BY updated_at DESC",
        )
        .bind(user_id)
        .fetch_all(self.pool.pool())
        .await?;

        let mut memories = Vec::new();
        for row in rows {
            memories.push(UserMemory {
                key: row.try_get("key")?,
                value: row.try_get("value")?,
                updated_at: row.try_get("updated_at")?,
            });
        }

        Ok(memories)
    }
}
