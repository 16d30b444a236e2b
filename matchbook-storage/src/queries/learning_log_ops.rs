//! Append-only learning log.

use chrono::NaiveDate;
use rusqlite::{params, Connection};

use matchbook_core::errors::MatchbookResult;
use matchbook_core::models::LearningLogEntry;
use matchbook_core::MatchKey;

use crate::to_storage_err;

/// Append an entry. Entries are never mutated or deleted.
pub fn append_entry(conn: &Connection, entry: &LearningLogEntry) -> MatchbookResult<()> {
    let payload = serde_json::to_string(&entry.payload)?;
    conn.execute(
        "INSERT INTO learning_log (id, date, category, description, payload, impact_score, match_key)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            entry.id,
            entry.date.format("%Y-%m-%d").to_string(),
            entry.category,
            entry.description,
            payload,
            entry.impact_score,
            entry.match_key.as_ref().map(|k| k.as_str().to_string()),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Most recent entries, newest first.
pub fn recent_entries(conn: &Connection, limit: usize) -> MatchbookResult<Vec<LearningLogEntry>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, date, category, description, payload, impact_score, match_key
             FROM learning_log ORDER BY created_at DESC LIMIT ?1",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(params![limit as i64], |row| Ok(parse_entry_row(row)))
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut results = Vec::new();
    for row in rows {
        let entry = row.map_err(|e| to_storage_err(e.to_string()))??;
        results.push(entry);
    }
    Ok(results)
}

fn parse_entry_row(row: &rusqlite::Row<'_>) -> MatchbookResult<LearningLogEntry> {
    let date_str: String = row.get(1).map_err(|e| to_storage_err(e.to_string()))?;
    let payload_str: String = row.get(4).map_err(|e| to_storage_err(e.to_string()))?;
    let key: Option<String> = row.get(6).map_err(|e| to_storage_err(e.to_string()))?;

    let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
        .map_err(|e| to_storage_err(format!("parse date '{date_str}': {e}")))?;
    let payload = serde_json::from_str(&payload_str)?;

    Ok(LearningLogEntry {
        id: row.get(0).map_err(|e| to_storage_err(e.to_string()))?,
        date,
        category: row.get(2).map_err(|e| to_storage_err(e.to_string()))?,
        description: row.get(3).map_err(|e| to_storage_err(e.to_string()))?,
        payload,
        impact_score: row.get(5).map_err(|e| to_storage_err(e.to_string()))?,
        match_key: key.map(MatchKey::from),
    })
}
