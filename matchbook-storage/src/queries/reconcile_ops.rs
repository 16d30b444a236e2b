//! Write-once outcome application.

use rusqlite::{params, Connection};

use matchbook_core::errors::MatchbookResult;
use matchbook_core::models::ConfidenceBucket;
use matchbook_core::MatchKey;

use crate::to_storage_err;

/// Conditionally attach an outcome to a prediction.
///
/// The `actual_winner IS NULL` guard is the exactly-once mechanism: two
/// reconciliation runs racing on the same row cannot both apply. The
/// first writer wins and the second sees zero affected rows. Returns true
/// if this call performed the update.
pub fn apply_outcome(
    conn: &Connection,
    key: &MatchKey,
    actual_winner: &str,
    correct: bool,
    bucket: ConfidenceBucket,
) -> MatchbookResult<bool> {
    let changed = conn
        .execute(
            "UPDATE predictions SET
                actual_winner = ?2,
                prediction_correct = ?3,
                confidence_bucket = ?4
             WHERE match_key = ?1 AND actual_winner IS NULL",
            params![key.as_str(), actual_winner, correct as i32, bucket.as_str()],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    Ok(changed > 0)
}
