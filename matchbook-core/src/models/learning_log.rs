use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::match_key::MatchKey;

/// Append-only record of a discovered pattern or anomaly.
/// Never mutated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearningLogEntry {
    pub id: String,
    pub date: NaiveDate,
    pub category: String,
    pub description: String,
    pub payload: serde_json::Value,
    pub impact_score: i32,
    pub match_key: Option<MatchKey>,
}

impl LearningLogEntry {
    /// Build a new entry dated today with a fresh id.
    pub fn new(category: &str, description: &str, payload: serde_json::Value) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            date: chrono::Utc::now().date_naive(),
            category: category.to_string(),
            description: description.to_string(),
            payload,
            impact_score: 0,
            match_key: None,
        }
    }

    /// Link the entry to a specific prediction.
    pub fn with_match_key(mut self, key: MatchKey) -> Self {
        self.match_key = Some(key);
        self
    }

    /// Set the impact score.
    pub fn with_impact(mut self, impact_score: i32) -> Self {
        self.impact_score = impact_score;
        self
    }
}
