//! Error types for the ticket service

use crate::persistence::PersistenceError;
use thiserror::Error;

/// Errors surfaced by the ticket service boundary
#[derive(Debug, Error)]
pub enum TicketError {
    /// Input failed field/type/enum constraints; raised before any store
    /// interaction
    #[error("Schema validation failed for '{field}': {reason}")]
    SchemaValidation { field: String, reason: String },

    /// A mutation addressed a ticket that does not exist
    #[error("Ticket not found: {unique_id}")]
    NotFound { unique_id: String },

    /// Underlying store failure; the transaction was rolled back in full
    #[error("Store error: {0}")]
    Store(PersistenceError),
}

impl From<PersistenceError> for TicketError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::NotFound { identifier, .. } => TicketError::NotFound {
                unique_id: identifier,
            },
            other => TicketError::Store(other),
        }
    }
}
