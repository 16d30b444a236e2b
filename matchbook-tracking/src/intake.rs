//! Morning write path: turn generator output into stored predictions.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use matchbook_core::errors::MatchbookResult;
use matchbook_core::models::{InsertOutcome, Prediction};
use matchbook_core::traits::{GeneratedPrediction, IPredictionStore, MatchContext};
use matchbook_core::MatchKey;

/// Stores one prediction per match, idempotently.
///
/// The external generator is called strictly before `record`; an
/// `AlreadyExists` result tells the caller to skip that call entirely for
/// the same match on subsequent runs.
pub struct PredictionIntake {
    storage: Arc<dyn IPredictionStore>,
}

impl PredictionIntake {
    pub fn new(storage: Arc<dyn IPredictionStore>) -> Self {
        Self { storage }
    }

    /// Whether a prediction already exists for this match. Lets callers
    /// avoid invoking the external generator for matches predicted today.
    pub fn already_predicted(&self, context: &MatchContext) -> MatchbookResult<bool> {
        let key = MatchKey::resolve(
            &context.tournament,
            &context.player1,
            &context.player2,
            context.match_date,
        );
        Ok(self.storage.get(&key)?.is_some())
    }

    /// Store the generated prediction for a match, stamping the current
    /// phase state. Duplicates are no-ops; confidence above the phase
    /// ceiling is a hard validation error from the store.
    pub fn record(
        &self,
        context: &MatchContext,
        generated: &GeneratedPrediction,
    ) -> MatchbookResult<InsertOutcome> {
        let key = MatchKey::resolve(
            &context.tournament,
            &context.player1,
            &context.player2,
            context.match_date,
        );
        let meta = self.storage.load_metadata()?;
        let now = Utc::now();

        let prediction = Prediction {
            match_key: key.clone(),
            prediction_day: context.match_date.unwrap_or_else(|| now.date_naive()),
            tournament: context.tournament.clone(),
            surface: context.surface.clone(),
            player1: context.player1.clone(),
            player2: context.player2.clone(),
            odds_player1: context.odds_player1,
            odds_player2: context.odds_player2,
            predicted_winner: generated.predicted_winner.clone(),
            confidence_score: generated.confidence_score,
            rationale: generated.rationale.clone(),
            risk_label: generated.risk_label.clone(),
            value_bet: generated.value_bet,
            recommended_action: generated.recommended_action.clone(),
            data_quality_score: generated.data_quality_score,
            learning_phase: meta.learning_phase,
            days_operated: meta.days_operated,
            system_accuracy: meta.accuracy_pct,
            created_at: now,
            actual_winner: None,
            prediction_correct: None,
            confidence_bucket: None,
        };

        let outcome = self.storage.insert_if_absent(&prediction)?;
        match outcome {
            InsertOutcome::Created => {
                info!(match_key = %key, confidence = generated.confidence_score, "prediction stored");
            }
            InsertOutcome::AlreadyExists => {
                debug!(match_key = %key, "prediction already stored, skipping");
            }
        }
        Ok(outcome)
    }
}
