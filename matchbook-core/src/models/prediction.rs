use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::match_key::MatchKey;
use crate::models::{ConfidenceBucket, LearningPhase};

/// A stored prediction for a single match.
///
/// One row per match key. The outcome fields stay `None` until the match is
/// reconciled, and reconciliation is write-once: `actual_winner` is never
/// overwritten.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    pub match_key: MatchKey,
    pub prediction_day: NaiveDate,
    pub tournament: String,
    pub surface: String,
    pub player1: String,
    pub player2: String,
    pub odds_player1: f64,
    pub odds_player2: f64,
    pub predicted_winner: String,
    /// Integer confidence 0–100, bounded by the phase ceiling at creation.
    pub confidence_score: u8,
    pub rationale: String,
    pub risk_label: String,
    pub value_bet: bool,
    pub recommended_action: String,
    pub data_quality_score: u8,
    pub learning_phase: LearningPhase,
    pub days_operated: u32,
    pub system_accuracy: f64,
    pub created_at: DateTime<Utc>,
    // Outcome fields, all None until reconciled.
    pub actual_winner: Option<String>,
    pub prediction_correct: Option<bool>,
    pub confidence_bucket: Option<ConfidenceBucket>,
}

impl Prediction {
    /// Whether this prediction has been reconciled against a real outcome.
    pub fn is_resolved(&self) -> bool {
        self.actual_winner.is_some()
    }
}

/// A completed match outcome, consumed by reconciliation and discarded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub tournament: String,
    pub player1: String,
    pub player2: String,
    pub match_date: Option<NaiveDate>,
    pub winner: String,
}

impl MatchOutcome {
    /// Resolve the canonical key for this outcome, using the same identity
    /// function as the write path.
    pub fn match_key(&self) -> MatchKey {
        MatchKey::resolve(&self.tournament, &self.player1, &self.player2, self.match_date)
    }
}

/// Result of an idempotent prediction insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsertOutcome {
    /// A new row was stored.
    Created,
    /// A prediction already exists for this match key; nothing was written.
    /// Callers use this to skip re-invoking the external generator.
    AlreadyExists,
}

/// Result of reconciling one outcome event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReconcileStatus {
    /// The outcome was applied to a previously unresolved prediction.
    Updated,
    /// No prediction exists for this match; logged for pattern analysis.
    SkippedNoPrediction,
    /// The prediction was already resolved; repeated runs are no-ops.
    SkippedAlreadyResolved,
}
