//! Ticket service: the stable, agent-callable API
//!
//! Thin orchestration over the validation boundary and the repository.
//! The service never caches records across calls; every operation
//! re-reads from the store within its own unit of work.

use std::sync::Arc;

use crate::persistence::{TicketRecord, TicketRepository};

use super::error::TicketError;
use super::schema::{TicketDraft, TicketPatch};

/// Agent-facing ticket operations
pub struct TicketService {
    repo: Arc<dyn TicketRepository>,
}

impl TicketService {
    pub fn new(repo: Arc<dyn TicketRepository>) -> Self {
        Self { repo }
    }

    /// Validate and persist a new ticket. Returns the full record
    /// including the server-generated `unique_id` and timestamps.
    pub async fn create_ticket(&self, draft: TicketDraft) -> Result<TicketRecord, TicketError> {
        draft.validate()?;
        let record = self.repo.insert(&draft).await?;
        tracing::info!(unique_id = %record.unique_id, user_id = %record.user_id, "Created ticket");
        Ok(record)
    }

    /// Look up a ticket by tracking identifier. Absence is a normal
    /// outcome for this query, never an error.
    pub async fn get_ticket(&self, unique_id: &str) -> Result<Option<TicketRecord>, TicketError> {
        Ok(self.repo.find_by_unique_id(unique_id).await?)
    }

    /// All tickets owned by a user; possibly empty
    pub async fn list_tickets_for_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<TicketRecord>, TicketError> {
        Ok(self.repo.find_all_by_user(user_id).await?)
    }

    /// Apply a partial patch to an existing ticket. Only supplied fields
    /// change; `updated_at` is refreshed. `TicketError::NotFound` when no
    /// ticket has that identifier, since the caller addressed a specific
    /// row.
    pub async fn edit_ticket(
        &self,
        unique_id: &str,
        patch: TicketPatch,
    ) -> Result<TicketRecord, TicketError> {
        patch.validate()?;
        let record = self.repo.update(unique_id, &patch).await?;
        tracing::info!(unique_id = %record.unique_id, "Edited ticket");
        Ok(record)
    }

    /// Permanently remove a ticket, returning the pre-deletion snapshot
    pub async fn delete_ticket(&self, unique_id: &str) -> Result<TicketRecord, TicketError> {
        let record = self.repo.delete(unique_id).await?;
        tracing::info!(unique_id = %record.unique_id, "Deleted ticket");
        Ok(record)
    }
}
