//! Database migrations for the persistence layer

use crate::persistence::error::PersistenceError;
use crate::persistence::pool::ConnectionPool;
use sqlx::Row;

/// Initial schema migration SQL
const MIGRATION_001_INITIAL: &str = r#"
-- Support tickets. `unique_id` is the externally visible tracking handle;
-- `id` is the internal storage key and never leaves the persistence layer.
CREATE TABLE IF NOT EXISTS tickets (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    unique_id TEXT NOT NULL UNIQUE,
    user_id TEXT NOT NULL,
    thread_id TEXT NOT NULL,
    user_name TEXT NOT NULL,
    subject TEXT NOT NULL,
    description TEXT NOT NULL,
    risk TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

-- Conversation checkpoints, one row per chat thread
CREATE TABLE IF NOT EXISTS conversations (
    thread_id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL,
    messages TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

-- Migration tracking table
CREATE TABLE IF NOT EXISTS _triage_migrations (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    applied_at TEXT NOT NULL,
    checksum TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_tickets_unique_id ON tickets(unique_id);
CREATE INDEX IF NOT EXISTS idx_tickets_user ON tickets(user_id);
CREATE INDEX IF NOT EXISTS idx_tickets_thread ON tickets(thread_id);
"#;

/// Migration 002: long-term key/value memories per user (name recall etc.)
const MIGRATION_002_USER_MEMORIES: &str = r#"
CREATE TABLE IF NOT EXISTS user_memories (
    user_id TEXT NOT NULL,
    key TEXT NOT NULL,
    value TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    PRIMARY KEY (user_id, key)
);
"#;

/// Migration definition
struct Migration {
    name: &'static str,
    sql: &'static str,
    checksum: &'static str,
}

/// Get all migrations in order
fn get_migrations() -> Vec<Migration> {
    vec![
        Migration {
            name: "001_initial_schema",
            sql: MIGRATION_001_INITIAL,
            checksum: "v1",
        },
        Migration {
            name: "002_user_memories",
            sql: MIGRATION_002_USER_MEMORIES,
            checksum: "v1",
        },
    ]
}

/// Migration runner for the persistence layer
pub struct MigrationRunner {
    pool: ConnectionPool,
}

impl MigrationRunner {
    /// Create a new migration runner
    pub fn new(pool: ConnectionPool) -> Self {
        Self { pool }
    }

    /// Run all pending migrations
    pub async fn migrate_up(&self) -> Result<MigrationResult, PersistenceError> {
        let migrations = get_migrations();
        let mut applied = 0;
        let mut skipped = 0;

        // Bootstrap the tracking table
        self.ensure_migrations_table().await?;

        for migration in migrations {
            if self.is_migration_applied(migration.name).await? {
                tracing::debug!("Migration '{}' already applied, skipping", migration.name);
                skipped += 1;
                continue;
            }

            tracing::info!("Applying migration: {}", migration.name);

            // SQLite needs statements executed one by one
            for statement in migration.sql.split(';') {
                let statement = statement
                    .lines()
                    .filter(|line| !line.trim_start().starts_with("--"))
                    .collect::<Vec<_>>()
                    .join("\n");
                let statement = statement.trim();
                if statement.is_empty() {
                    continue;
                }

                sqlx::query(statement)
                    .execute(self.pool.pool())
                    .await
                    .map_err(|e| {
                        PersistenceError::Migration(format!(
                            "Failed to execute migration '{}': {}",
                            migration.name, e
                        ))
                    })?;
            }

            self.record_migration(migration.name, migration.checksum)
                .await?;

            tracing::info!("Migration '{}' applied successfully", migration.name);
            applied += 1;
        }

        Ok(MigrationResult { applied, skipped })
    }

    async fn ensure_migrations_table(&self) -> Result<(), PersistenceError> {
        let sql = r#"
            CREATE TABLE IF NOT EXISTS _triage_migrations (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL UNIQUE,
                applied_at TEXT NOT NULL,
                checksum TEXT NOT NULL
            )
        "#;

        sqlx::query(sql)
            .execute(self.pool.pool())
            .await
            .map_err(|e| {
                PersistenceError::Migration(format!("Failed to create migrations table: {}", e))
            })?;

        Ok(())
    }

    async fn is_migration_applied(&self, name: &str) -> Result<bool, PersistenceError> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM _triage_migrations WHERE name = ?")
            .bind(name)
            .fetch_one(self.pool.pool())
            .await
            .map_err(|e| {
                PersistenceError::Migration(format!("Failed to check migration status: {}", e))
            })?;

        let count: i64 = row.try_get("count").unwrap_or(0);
        Ok(count > 0)
    }

    async fn record_migration(&self, name: &str, checksum: &str) -> Result<(), PersistenceError> {
        let now = chrono::Utc::now().to_rfc3339();

        sqlx::query("INSERT INTO _triage_migrations (name, applied_at, checksum) VALUES (?, ?, ?)")
            .bind(name)
            .bind(&now)
            .bind(checksum)
            .execute(self.pool.pool())
            .await
            .map_err(|e| {
                PersistenceError::Migration(format!("Failed to record migration: {}", e))
            })?;

        Ok(())
    }
}

/// Result of running migrations
#[derive(Debug)]
pub struct MigrationResult {
    /// Number of migrations applied
    pub applied: usize,
    /// Number of migrations skipped (already applied)
    pub skipped: usize,
}
