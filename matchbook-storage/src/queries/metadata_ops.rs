//! System metadata singleton: load, bootstrap, full-scan recompute.

use chrono::Utc;
use rusqlite::{params, Connection};

use matchbook_core::errors::MatchbookResult;
use matchbook_core::models::{BucketAccuracy, LearningPhase, SystemMetadata};

use super::prediction_crud::OptionalRow;
use crate::to_storage_err;

/// Load the singleton, initializing bootstrap state on first access.
pub fn load_metadata(conn: &Connection) -> MatchbookResult<SystemMetadata> {
    match read_metadata(conn)? {
        Some(meta) => Ok(meta),
        None => {
            let meta = SystemMetadata::bootstrap(Utc::now());
            write_metadata(conn, &meta)?;
            Ok(meta)
        }
    }
}

/// Recompute every counter and ratio from the predictions table and persist
/// the phase state derived from `days_operated`, in a single transaction.
///
/// Nothing is incremented in place, so overlapping reconciliation batches
/// converge on the same state regardless of interleaving.
pub fn recompute_metadata(conn: &Connection, days_operated: u32) -> MatchbookResult<SystemMetadata> {
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| to_storage_err(format!("recompute_metadata begin: {e}")))?;

    let meta = match recompute_inner(&tx, days_operated) {
        Ok(meta) => meta,
        Err(e) => {
            let _ = tx.rollback();
            return Err(e);
        }
    };
    tx.commit()
        .map_err(|e| to_storage_err(format!("recompute_metadata commit: {e}")))?;
    Ok(meta)
}

fn recompute_inner(conn: &Connection, days_operated: u32) -> MatchbookResult<SystemMetadata> {
    let (total_resolved, correct_count) = resolved_counts(conn, None)?;
    let high = bucket_counts(conn, "high")?;
    let medium = bucket_counts(conn, "medium")?;
    let low = bucket_counts(conn, "low")?;

    let phase = LearningPhase::for_days(days_operated);
    let accuracy_pct = if total_resolved == 0 {
        0.0
    } else {
        f64::from(correct_count) * 100.0 / f64::from(total_resolved)
    };

    let meta = SystemMetadata {
        days_operated,
        learning_phase: phase,
        accuracy_pct,
        total_resolved,
        correct_count,
        incorrect_count: total_resolved - correct_count,
        high_bucket: high,
        medium_bucket: medium,
        low_bucket: low,
        max_confidence_allowed: phase.max_confidence(),
        last_updated: Utc::now(),
    };
    write_metadata(conn, &meta)?;
    Ok(meta)
}

fn resolved_counts(
    conn: &Connection,
    bucket: Option<&str>,
) -> MatchbookResult<(u32, u32)> {
    let (sql, params): (&str, Vec<&dyn rusqlite::types::ToSql>) = match bucket {
        Some(ref b) => (
            "SELECT COUNT(*), COALESCE(SUM(prediction_correct), 0)
             FROM predictions WHERE actual_winner IS NOT NULL AND confidence_bucket = ?1",
            vec![b],
        ),
        None => (
            "SELECT COUNT(*), COALESCE(SUM(prediction_correct), 0)
             FROM predictions WHERE actual_winner IS NOT NULL",
            vec![],
        ),
    };
    let (total, correct): (i64, i64) = conn
        .query_row(sql, params.as_slice(), |row| {
            Ok((row.get(0)?, row.get(1)?))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok((total.max(0) as u32, correct.max(0) as u32))
}

fn bucket_counts(conn: &Connection, bucket: &str) -> MatchbookResult<BucketAccuracy> {
    let (total, correct) = resolved_counts(conn, Some(bucket))?;
    Ok(BucketAccuracy { total, correct })
}

fn read_metadata(conn: &Connection) -> MatchbookResult<Option<SystemMetadata>> {
    let mut stmt = conn
        .prepare(
            "SELECT days_operated, learning_phase, accuracy_pct, total_resolved,
                    correct_count, incorrect_count, high_total, high_correct,
                    medium_total, medium_correct, low_total, low_correct,
                    max_confidence_allowed, last_updated
             FROM system_metadata WHERE id = 1",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let result = stmt
        .query_row([], |row| Ok(parse_metadata_row(row)))
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;

    match result {
        Some(Ok(meta)) => Ok(Some(meta)),
        Some(Err(e)) => Err(e),
        None => Ok(None),
    }
}

fn parse_metadata_row(row: &rusqlite::Row<'_>) -> MatchbookResult<SystemMetadata> {
    let phase_str: String = row.get(1).map_err(|e| to_storage_err(e.to_string()))?;
    let updated_str: String = row.get(13).map_err(|e| to_storage_err(e.to_string()))?;

    let learning_phase = LearningPhase::parse(&phase_str)
        .ok_or_else(|| to_storage_err(format!("unknown learning_phase '{phase_str}'")))?;
    let last_updated = chrono::DateTime::parse_from_rfc3339(&updated_str)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| to_storage_err(format!("parse last_updated '{updated_str}': {e}")))?;

    let get_u32 = |idx: usize| -> MatchbookResult<u32> {
        Ok(row
            .get::<_, i64>(idx)
            .map_err(|e| to_storage_err(e.to_string()))?
            .max(0) as u32)
    };

    Ok(SystemMetadata {
        days_operated: get_u32(0)?,
        learning_phase,
        accuracy_pct: row.get(2).map_err(|e| to_storage_err(e.to_string()))?,
        total_resolved: get_u32(3)?,
        correct_count: get_u32(4)?,
        incorrect_count: get_u32(5)?,
        high_bucket: BucketAccuracy {
            total: get_u32(6)?,
            correct: get_u32(7)?,
        },
        medium_bucket: BucketAccuracy {
            total: get_u32(8)?,
            correct: get_u32(9)?,
        },
        low_bucket: BucketAccuracy {
            total: get_u32(10)?,
            correct: get_u32(11)?,
        },
        max_confidence_allowed: row
            .get::<_, i64>(12)
            .map_err(|e| to_storage_err(e.to_string()))? as u8,
        last_updated,
    })
}

/// Upsert the singleton row.
fn write_metadata(conn: &Connection, meta: &SystemMetadata) -> MatchbookResult<()> {
    conn.execute(
        "INSERT INTO system_metadata (
            id, days_operated, learning_phase, accuracy_pct, total_resolved,
            correct_count, incorrect_count, high_total, high_correct,
            medium_total, medium_correct, low_total, low_correct,
            max_confidence_allowed, last_updated
        ) VALUES (1, ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)
        ON CONFLICT(id) DO UPDATE SET
            days_operated = excluded.days_operated,
            learning_phase = excluded.learning_phase,
            accuracy_pct = excluded.accuracy_pct,
            total_resolved = excluded.total_resolved,
            correct_count = excluded.correct_count,
            incorrect_count = excluded.incorrect_count,
            high_total = excluded.high_total,
            high_correct = excluded.high_correct,
            medium_total = excluded.medium_total,
            medium_correct = excluded.medium_correct,
            low_total = excluded.low_total,
            low_correct = excluded.low_correct,
            max_confidence_allowed = excluded.max_confidence_allowed,
            last_updated = excluded.last_updated",
        params![
            meta.days_operated,
            meta.learning_phase.as_str(),
            meta.accuracy_pct,
            meta.total_resolved,
            meta.correct_count,
            meta.incorrect_count,
            meta.high_bucket.total,
            meta.high_bucket.correct,
            meta.medium_bucket.total,
            meta.medium_bucket.correct,
            meta.low_bucket.total,
            meta.low_bucket.correct,
            meta.max_confidence_allowed,
            meta.last_updated.to_rfc3339(),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
