//! Versioned schema migrations, tracked in a `schema_version` table.

mod v001_predictions;
mod v002_system_metadata;
mod v003_learning_log;

use rusqlite::Connection;

use matchbook_core::errors::{MatchbookError, MatchbookResult, StorageError};

use crate::to_storage_err;

/// All migrations in order. Each runs at most once.
const MIGRATIONS: &[(u32, fn(&Connection) -> MatchbookResult<()>)] = &[
    (1, v001_predictions::migrate),
    (2, v002_system_metadata::migrate),
    (3, v003_learning_log::migrate),
];

/// Run all pending migrations.
pub fn run_migrations(conn: &Connection) -> MatchbookResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version    INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        )",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    let current = current_version(conn)?;
    for (version, migrate) in MIGRATIONS {
        if *version <= current {
            continue;
        }
        migrate(conn).map_err(|e| {
            MatchbookError::Storage(StorageError::MigrationFailed {
                version: *version,
                reason: e.to_string(),
            })
        })?;
        conn.execute(
            "INSERT INTO schema_version (version) VALUES (?1)",
            rusqlite::params![version],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
        tracing::debug!(version, "applied migration");
    }
    Ok(())
}

/// Highest applied migration version, 0 for a fresh database.
pub fn current_version(conn: &Connection) -> MatchbookResult<u32> {
    conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )
    .map_err(|e| to_storage_err(e.to_string()))
}
