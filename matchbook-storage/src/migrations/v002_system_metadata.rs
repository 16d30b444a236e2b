//! v002: system_metadata singleton row.

use rusqlite::Connection;

use matchbook_core::errors::MatchbookResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> MatchbookResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS system_metadata (
            id                     INTEGER PRIMARY KEY CHECK (id = 1),
            days_operated          INTEGER NOT NULL DEFAULT 0,
            learning_phase         TEXT NOT NULL DEFAULT 'collection',
            accuracy_pct           REAL NOT NULL DEFAULT 0,
            total_resolved         INTEGER NOT NULL DEFAULT 0,
            correct_count          INTEGER NOT NULL DEFAULT 0,
            incorrect_count        INTEGER NOT NULL DEFAULT 0,
            high_total             INTEGER NOT NULL DEFAULT 0,
            high_correct           INTEGER NOT NULL DEFAULT 0,
            medium_total           INTEGER NOT NULL DEFAULT 0,
            medium_correct         INTEGER NOT NULL DEFAULT 0,
            low_total              INTEGER NOT NULL DEFAULT 0,
            low_correct            INTEGER NOT NULL DEFAULT 0,
            max_confidence_allowed INTEGER NOT NULL DEFAULT 60,
            last_updated           TEXT NOT NULL
        );
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
