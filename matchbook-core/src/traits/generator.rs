use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::MatchbookResult;

/// The match a prediction is requested for, as discovered by data collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchContext {
    pub tournament: String,
    pub surface: String,
    pub player1: String,
    pub player2: String,
    pub odds_player1: f64,
    pub odds_player2: f64,
    pub match_date: Option<NaiveDate>,
}

/// What the external generator produced for a match. The core never depends
/// on how this was made.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedPrediction {
    pub predicted_winner: String,
    pub confidence_score: u8,
    pub rationale: String,
    pub risk_label: String,
    pub value_bet: bool,
    pub recommended_action: String,
    pub data_quality_score: u8,
}

/// External prediction-generation service. Called strictly before
/// `insert_if_absent`; nothing in this core blocks on it.
pub trait IPredictionGenerator: Send + Sync {
    fn generate(&self, context: &MatchContext) -> MatchbookResult<GeneratedPrediction>;
}
