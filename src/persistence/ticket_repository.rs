//! Repository for support tickets
//!
//! Every mutating operation runs inside its own transaction: it either
//! commits fully formed or rolls back before the error propagates (sqlx
//! rolls back on drop). Reads are single statements against the pool.

use crate::persistence::error::PersistenceError;
use crate::persistence::models::TicketRecord;
use crate::persistence::pool::ConnectionPool;
use crate::tickets::schema::{Risk, TicketDraft, TicketPatch};
use async_trait::async_trait;
use sqlx::Row;

/// Repository trait for ticket CRUD operations
#[async_trait]
pub trait TicketRepository: Send + Sync {
    /// Insert a new ticket, assigning `unique_id` and timestamps.
    /// Returns the full persisted record including generated fields.
    async fn insert(&self, draft: &TicketDraft) -> Result<TicketRecord, PersistenceError>;

    /// Exact-match lookup by tracking identifier. A missing row is a
    /// normal outcome, not an error.
    async fn find_by_unique_id(
        &self,
        unique_id: &str,
    ) -> Result<Option<TicketRecord>, PersistenceError>;

    /// All tickets owned by a user, ordered by insertion. Empty when none.
    async fn find_all_by_user(&self, user_id: &str) -> Result<Vec<TicketRecord>, PersistenceError>;

    /// Apply a field-level overwrite for every field present in the patch
    /// and refresh `updated_at`. Fails with `NotFound` if no row matches.
    async fn update(
        &self,
        unique_id: &str,
        patch: &TicketPatch,
    ) -> Result<TicketRecord, PersistenceError>;

    /// Remove the row and return the pre-deletion snapshot.
    /// Fails with `NotFound` if no row matches.
    async fn delete(&self, unique_id: &str) -> Result<TicketRecord, PersistenceError>;
}

/// SQLx-based implementation of `TicketRepository`
pub struct SqlxTicketRepository {
    pool: ConnectionPool,
}

impl SqlxTicketRepository {
    pub fn new(pool: ConnectionPool) -> Self {
        Self { pool }
    }

    fn parse_row(row: &sqlx::any::AnyRow) -> Result<TicketRecord, PersistenceError> {
        let risk_str: String = row.try_get("risk")?;
        let risk = Risk::parse(&risk_str)
            .map_err(|_| PersistenceError::Internal(format!("invalid risk value '{}' in row", risk_str)))?;

        Ok(TicketRecord {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            thread_id: row.try_get("thread_id")?,
            user_name: row.try_get("user_name")?,
            subject: row.try_get("subject")?,
            description: row.try_get("description")?,
            risk,
            unique_id: row.try_get("unique_id")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

#[async_trait]
impl TicketRepository for SqlxTicketRepository {
    async fn insert(&self, draft: &TicketDraft) -> Result<TicketRecord, PersistenceError> {
        let unique_id = uuid::Uuid::new_v4().to_string();
        let now = chrono::Utc::now().to_rfc3339();

        let mut tx = self.pool.pool().begin().await?;

        sqlx::query(
            "INSERT INTO tickets (unique_id, user_id, thread_id, user_name, subject, description, risk, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&unique_id)
        .bind(&draft.user_id)
        .bind(&draft.thread_id)
        .bind(&draft.user_name)
        .bind(&draft.subject)
        .bind(&draft.description)
        .bind(draft.risk.as_str())
        .bind(&now)
        .bind(&now)
        .execute(&mut *tx)
        .await?;

        // Read-your-writes within the same transaction to return the row
        // exactly as persisted, including the storage-assigned id.
        let row = sqlx::query("SELECT * FROM tickets WHERE unique_id = ?")
            .bind(&unique_id)
            .fetch_one(&mut *tx)
            .await?;
        let record = Self::parse_row(&row)?;

        tx.commit().await?;

        Ok(record)
    }

    async fn find_by_unique_id(
        &self,
        unique_id: &str,
    ) -> Result<Option<TicketRecord>, PersistenceError> {
        let row = sqlx::query("SELECT * FROM tickets WHERE unique_id = ?")
            .bind(unique_id)
            .fetch_optional(self.pool.pool())
            .await?;

        match row {
            Some(row) => Ok(Some(Self::parse_row(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_all_by_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<TicketRecord>, PersistenceError> {
        let rows = sqlx::query("SELECT * FROM tickets WHERE user_id = ? ORDER BY id")
            .bind(user_id)
            .fetch_all(self.pool.pool())
            .await?;

        let mut records = Vec::new();
        for row in rows {
            records.push(Self::parse_row(&row)?);
        }

        Ok(records)
    }

    async fn update(
        &self,
        unique_id: &str,
        patch: &TicketPatch,
    ) -> Result<TicketRecord, PersistenceError> {
        let now = chrono::Utc::now().to_rfc3339();

        let mut tx = self.pool.pool().begin().await?;

        // Existence must be checked explicitly: mutating a missing row is
        // a caller error, not a no-op.
        let row = sqlx::query("SELECT * FROM tickets WHERE unique_id = ?")
            .bind(unique_id)
            .fetch_optional(&mut *tx)
            .await?;
        let current = match row {
            Some(row) => Self::parse_row(&row)?,
            None => return Err(PersistenceError::ticket_not_found(unique_id)),
        };

        let user_name = patch.user_name.as_deref().unwrap_or(&current.user_name);
        let subject = patch.subject.as_deref().unwrap_or(&current.subject);
        let description = patch
            .description
            .as_deref()
            .unwrap_or(&current.description);
        let risk = patch.risk.unwrap_or(current.risk);

        sqlx::query(
            "UPDATE tickets SET user_name = ?, subject = ?, description = ?, risk = ?, updated_at = ? WHERE unique_id = ?",
        )
        .bind(user_name)
        .bind(subject)
        .bind(description)
        .bind(risk.as_str())
        .bind(&now)
        .bind(unique_id)
        .execute(&mut *tx)
        .await?;

        let row = sqlx::query("SELECT * FROM tickets WHERE unique_id = ?")
            .bind(unique_id)
            .fetch_one(&mut *tx)
            .await?;
        let record = Self::parse_row(&row)?;

        tx.commit().await?;

        Ok(record)
    }

    async fn delete(&self, unique_id: &str) -> Result<TicketRecord, PersistenceError> {
        let mut tx = self.pool.pool().begin().await?;

        let row = sqlx::query("SELECT * FROM tickets WHERE unique_id = ?")
            .bind(unique_id)
            .fetch_optional(&mut *tx)
            .await?;
        let snapshot = match row {
            Some(row) => Self::parse_row(&row)?,
            None => return Err(PersistenceError::ticket_not_found(unique_id)),
        };

        sqlx::query("DELETE FROM tickets WHERE unique_id = ?")
            .bind(unique_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(snapshot)
    }
}
