//! Database persistence layer for Triage
//!
//! Database-backed storage for support tickets, conversation checkpoints,
//! and long-term user memories, supporting PostgreSQL, SQLite, and MySQL
//! through `sqlx::Any`.
//!
//! # Architecture
//!
//! - `Storage`: main entry point, owns the connection pool
//! - `TicketRepository`: transactional CRUD over ticket rows
//! - `MemoryRepository`: key/value notes per user
//! - `MigrationRunner`: checksum-tracked schema migrations

pub mod error;
pub mod memory_repository;
pub mod migrations;
pub mod models;
pub mod pool;
pub mod ticket_repository;

pub use error::PersistenceError;
pub use memory_repository::{MemoryRepository, SqlxMemoryRepository};
pub use migrations::{MigrationResult, MigrationRunner};
pub use models::{TicketRecord, UserMemory};
pub use pool::{ConnectionPool, DatabaseBackend};
pub use ticket_repository::{SqlxTicketRepository, TicketRepository};

use crate::config::DatabaseSettings;
use std::sync::Arc;

/// Main storage handle providing access to all persistence operations.
///
/// The pool is explicitly injected into every repository; there is no
/// ambient global session state.
#[derive(Clone)]
pub struct Storage {
    pool: ConnectionPool,
    tickets: Arc<SqlxTicketRepository>,
    memories: Arc<SqlxMemoryRepository>,
}

impl Storage {
    /// Connect to the database described by the settings
    pub async fn connect(settings: &DatabaseSettings) -> Result<Self, PersistenceError> {
        let pool = ConnectionPool::connect(
            &settings.url,
            settings.max_connections,
            settings.connect_timeout_secs,
        )
        .await?;

        Ok(Self::from_pool(pool))
    }

    /// Build a storage handle around an existing pool
    pub fn from_pool(pool: ConnectionPool) -> Self {
        let tickets = Arc::new(SqlxTicketRepository::new(pool.clone()));
        let memories = Arc::new(SqlxMemoryRepository::new(pool.clone()));

        Self {
            pool,
            tickets,
            memories,
        }
    }

    /// Get the ticket repository
    pub fn tickets(&self) -> Arc<SqlxTicketRepository> {
        self.tickets.clone()
    }

    /// Get the user memory repository
    pub fn memories(&self) -> Arc<SqlxMemoryRepository> {
        self.memories.clone()
    }

    /// Get the connection pool
    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }

    /// Run database migrations
    pub async fn migrate(&self) -> Result<MigrationResult, PersistenceError> {
        let runner = MigrationRunner::new(self.pool.clone());
        runner.migrate_up().await
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<(), PersistenceError> {
        self.pool.health_check().await
    }

    /// Close the database connection
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
