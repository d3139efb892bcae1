//! Persistence layer error types

use thiserror::Error;

/// Errors that can occur in the persistence layer
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Database connection error
    #[error("Database connection error: {0}")]
    Connection(String),

    /// Row not found
    #[error("Row not found: {entity_type} with identifier '{identifier}'")]
    NotFound {
        entity_type: String,
        identifier: String,
    },

    /// Migration error
    #[error("Migration error: {0}")]
    Migration(String),

    /// Database error from SQLx
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PersistenceError {
    /// Shorthand for a missing ticket row
    pub fn ticket_not_found(unique_id: &str) -> Self {
        Self::NotFound {
            entity_type: "ticket".to_string(),
            identifier: unique_id.to_string(),
        }
    }
}
