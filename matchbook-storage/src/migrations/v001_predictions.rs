//! v001: predictions table with the match-key uniqueness constraint.

use rusqlite::Connection;

use matchbook_core::errors::MatchbookResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> MatchbookResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS predictions (
            id                  INTEGER PRIMARY KEY AUTOINCREMENT,
            match_key           TEXT NOT NULL UNIQUE,
            prediction_day      TEXT NOT NULL,
            tournament          TEXT NOT NULL,
            surface             TEXT NOT NULL,
            player1             TEXT NOT NULL,
            player2             TEXT NOT NULL,
            odds_player1        REAL NOT NULL,
            odds_player2        REAL NOT NULL,
            predicted_winner    TEXT NOT NULL,
            confidence_score    INTEGER NOT NULL CHECK (confidence_score BETWEEN 0 AND 100),
            rationale           TEXT NOT NULL DEFAULT '',
            risk_label          TEXT NOT NULL DEFAULT '',
            value_bet           INTEGER NOT NULL DEFAULT 0,
            recommended_action  TEXT NOT NULL DEFAULT '',
            data_quality_score  INTEGER NOT NULL DEFAULT 0,
            learning_phase      TEXT NOT NULL,
            days_operated       INTEGER NOT NULL,
            system_accuracy     REAL NOT NULL DEFAULT 0,
            created_at          TEXT NOT NULL,
            actual_winner       TEXT,
            prediction_correct  INTEGER,
            confidence_bucket   TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_predictions_day ON predictions(prediction_day);
        CREATE INDEX IF NOT EXISTS idx_predictions_tournament ON predictions(tournament);
        CREATE INDEX IF NOT EXISTS idx_predictions_surface ON predictions(surface);
        CREATE INDEX IF NOT EXISTS idx_predictions_unresolved ON predictions(prediction_day)
            WHERE actual_winner IS NULL;
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
