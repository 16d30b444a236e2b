//! Insert-if-absent, get, and unresolved listing for predictions.

use chrono::NaiveDate;
use rusqlite::{params, Connection};

use matchbook_core::errors::MatchbookResult;
use matchbook_core::models::{ConfidenceBucket, InsertOutcome, LearningPhase, Prediction};
use matchbook_core::MatchKey;

use crate::to_storage_err;

/// The SELECT columns for all prediction reads (23 columns, indices 0-22).
pub(crate) const PREDICTION_COLUMNS: &str =
    "match_key, prediction_day, tournament, surface, player1, player2,
     odds_player1, odds_player2, predicted_winner, confidence_score,
     rationale, risk_label, value_bet, recommended_action, data_quality_score,
     learning_phase, days_operated, system_accuracy, created_at,
     actual_winner, prediction_correct, confidence_bucket, id";

/// Insert a prediction unless one already exists for its match key.
///
/// The `ON CONFLICT DO NOTHING` clause makes duplicate inserts a no-op at
/// the store level, which is what keeps overlapping morning runs safe
/// without any in-process locking. The affected-row count distinguishes
/// `Created` from `AlreadyExists`.
pub fn insert_if_absent(
    conn: &Connection,
    prediction: &Prediction,
) -> MatchbookResult<InsertOutcome> {
    let changed = conn
        .execute(
            "INSERT INTO predictions (
                match_key, prediction_day, tournament, surface, player1, player2,
                odds_player1, odds_player2, predicted_winner, confidence_score,
                rationale, risk_label, value_bet, recommended_action,
                data_quality_score, learning_phase, days_operated,
                system_accuracy, created_at
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10,
                ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19
            )
            ON CONFLICT(match_key) DO NOTHING",
            params![
                prediction.match_key.as_str(),
                prediction.prediction_day.format("%Y-%m-%d").to_string(),
                prediction.tournament,
                prediction.surface,
                prediction.player1,
                prediction.player2,
                prediction.odds_player1,
                prediction.odds_player2,
                prediction.predicted_winner,
                prediction.confidence_score,
                prediction.rationale,
                prediction.risk_label,
                prediction.value_bet as i32,
                prediction.recommended_action,
                prediction.data_quality_score,
                prediction.learning_phase.as_str(),
                prediction.days_operated,
                prediction.system_accuracy,
                prediction.created_at.to_rfc3339(),
            ],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    if changed == 0 {
        Ok(InsertOutcome::AlreadyExists)
    } else {
        Ok(InsertOutcome::Created)
    }
}

/// Get a single prediction by match key.
pub fn get_prediction(conn: &Connection, key: &MatchKey) -> MatchbookResult<Option<Prediction>> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {PREDICTION_COLUMNS} FROM predictions WHERE match_key = ?1"
        ))
        .map_err(|e| to_storage_err(e.to_string()))?;

    let result = stmt
        .query_row(params![key.as_str()], |row| Ok(parse_prediction_row(row)))
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;

    match result {
        Some(Ok(prediction)) => Ok(Some(prediction)),
        Some(Err(e)) => Err(e),
        None => Ok(None),
    }
}

/// Predictions for a day whose outcome is still unknown.
pub fn list_unresolved(conn: &Connection, day: NaiveDate) -> MatchbookResult<Vec<Prediction>> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {PREDICTION_COLUMNS} FROM predictions
             WHERE prediction_day = ?1 AND actual_winner IS NULL
             ORDER BY created_at"
        ))
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(params![day.format("%Y-%m-%d").to_string()], |row| {
            Ok(parse_prediction_row(row))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut results = Vec::new();
    for row in rows {
        let prediction = row.map_err(|e| to_storage_err(e.to_string()))??;
        results.push(prediction);
    }
    Ok(results)
}

/// Parse a row from the predictions table into a Prediction.
pub(crate) fn parse_prediction_row(row: &rusqlite::Row<'_>) -> MatchbookResult<Prediction> {
    let day_str: String = row.get(1).map_err(|e| to_storage_err(e.to_string()))?;
    let phase_str: String = row.get(15).map_err(|e| to_storage_err(e.to_string()))?;
    let created_str: String = row.get(18).map_err(|e| to_storage_err(e.to_string()))?;
    let bucket_str: Option<String> = row.get(21).map_err(|e| to_storage_err(e.to_string()))?;

    let prediction_day = NaiveDate::parse_from_str(&day_str, "%Y-%m-%d")
        .map_err(|e| to_storage_err(format!("parse prediction_day '{day_str}': {e}")))?;
    let learning_phase = LearningPhase::parse(&phase_str)
        .ok_or_else(|| to_storage_err(format!("unknown learning_phase '{phase_str}'")))?;
    let created_at = chrono::DateTime::parse_from_rfc3339(&created_str)
        .map(|dt| dt.with_timezone(&chrono::Utc))
        .map_err(|e| to_storage_err(format!("parse created_at '{created_str}': {e}")))?;
    let confidence_bucket = match bucket_str {
        Some(s) => Some(
            ConfidenceBucket::parse(&s)
                .ok_or_else(|| to_storage_err(format!("unknown confidence_bucket '{s}'")))?,
        ),
        None => None,
    };

    let key: String = row.get(0).map_err(|e| to_storage_err(e.to_string()))?;

    Ok(Prediction {
        match_key: MatchKey::from(key),
        prediction_day,
        tournament: row.get(2).map_err(|e| to_storage_err(e.to_string()))?,
        surface: row.get(3).map_err(|e| to_storage_err(e.to_string()))?,
        player1: row.get(4).map_err(|e| to_storage_err(e.to_string()))?,
        player2: row.get(5).map_err(|e| to_storage_err(e.to_string()))?,
        odds_player1: row.get(6).map_err(|e| to_storage_err(e.to_string()))?,
        odds_player2: row.get(7).map_err(|e| to_storage_err(e.to_string()))?,
        predicted_winner: row.get(8).map_err(|e| to_storage_err(e.to_string()))?,
        confidence_score: row
            .get::<_, i64>(9)
            .map_err(|e| to_storage_err(e.to_string()))? as u8,
        rationale: row.get(10).map_err(|e| to_storage_err(e.to_string()))?,
        risk_label: row.get(11).map_err(|e| to_storage_err(e.to_string()))?,
        value_bet: row
            .get::<_, i32>(12)
            .map_err(|e| to_storage_err(e.to_string()))?
            != 0,
        recommended_action: row.get(13).map_err(|e| to_storage_err(e.to_string()))?,
        data_quality_score: row
            .get::<_, i64>(14)
            .map_err(|e| to_storage_err(e.to_string()))? as u8,
        learning_phase,
        days_operated: row
            .get::<_, i64>(16)
            .map_err(|e| to_storage_err(e.to_string()))? as u32,
        system_accuracy: row.get(17).map_err(|e| to_storage_err(e.to_string()))?,
        created_at,
        actual_winner: row.get(19).map_err(|e| to_storage_err(e.to_string()))?,
        prediction_correct: row
            .get::<_, Option<i32>>(20)
            .map_err(|e| to_storage_err(e.to_string()))?
            .map(|v| v != 0),
        confidence_bucket,
    })
}

/// Helper trait to make `query_row` return `Option` on not-found.
pub(crate) trait OptionalRow<T> {
    fn optional(self) -> Result<Option<T>, rusqlite::Error>;
}

impl<T> OptionalRow<T> for Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>, rusqlite::Error> {
        match self {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
