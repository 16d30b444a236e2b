//! v003: append-only learning_log.

use rusqlite::Connection;

use matchbook_core::errors::MatchbookResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> MatchbookResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS learning_log (
            id           TEXT PRIMARY KEY,
            date         TEXT NOT NULL,
            category     TEXT NOT NULL,
            description  TEXT NOT NULL,
            payload      TEXT NOT NULL DEFAULT '{}',
            impact_score INTEGER NOT NULL DEFAULT 0,
            match_key    TEXT,
            created_at   TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );

        CREATE INDEX IF NOT EXISTS idx_learning_log_date ON learning_log(date);
        CREATE INDEX IF NOT EXISTS idx_learning_log_category ON learning_log(category);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
