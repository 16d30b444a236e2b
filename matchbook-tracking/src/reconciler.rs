//! Evening ingestion: attach real outcomes to stored predictions,
//! exactly once.

use std::sync::Arc;

use tracing::{info, warn};

use matchbook_core::errors::MatchbookResult;
use matchbook_core::models::{
    ConfidenceBucket, LearningLogEntry, MatchOutcome, ReconcileStatus, SystemMetadata,
};
use matchbook_core::traits::IPredictionStore;

use crate::calibrator::PhaseCalibrator;

/// Applies completed match outcomes to stored predictions.
///
/// Safe to re-run: an outcome that was already applied, or that matches no
/// prediction, is a successful no-op. The store's conditional update is
/// what makes concurrent evening runs first-writer-wins.
pub struct Reconciler {
    storage: Arc<dyn IPredictionStore>,
}

impl Reconciler {
    pub fn new(storage: Arc<dyn IPredictionStore>) -> Self {
        Self { storage }
    }

    /// Reconcile a single outcome event.
    pub fn reconcile(&self, outcome: &MatchOutcome) -> MatchbookResult<ReconcileStatus> {
        let key = outcome.match_key();

        let Some(prediction) = self.storage.get(&key)? else {
            // Unmatched results are worth keeping: a cluster of them
            // usually means an identity-resolution bug upstream.
            warn!(match_key = %key, winner = %outcome.winner, "result without stored prediction");
            let entry = LearningLogEntry::new(
                "unmatched_result",
                "completed match had no stored prediction",
                serde_json::json!({
                    "tournament": outcome.tournament,
                    "player1": outcome.player1,
                    "player2": outcome.player2,
                    "winner": outcome.winner,
                }),
            )
            .with_match_key(key);
            self.storage.append_learning_log(&entry)?;
            return Ok(ReconcileStatus::SkippedNoPrediction);
        };

        if prediction.is_resolved() {
            return Ok(ReconcileStatus::SkippedAlreadyResolved);
        }

        let correct = outcome.winner == prediction.predicted_winner;
        let bucket = ConfidenceBucket::from_score(prediction.confidence_score);

        // The conditional update can still lose to a concurrent run between
        // the read above and here; treat that as already resolved.
        let updated =
            self.storage
                .apply_outcome(&key, &outcome.winner, correct, bucket)?;
        if !updated {
            return Ok(ReconcileStatus::SkippedAlreadyResolved);
        }

        info!(
            match_key = %key,
            winner = %outcome.winner,
            correct,
            bucket = %bucket,
            "prediction reconciled"
        );
        Ok(ReconcileStatus::Updated)
    }

    /// Reconcile a batch of outcomes, then recalibrate system metadata.
    /// Returns the per-event statuses and the post-batch metadata.
    pub fn reconcile_batch(
        &self,
        outcomes: &[MatchOutcome],
    ) -> MatchbookResult<(Vec<ReconcileStatus>, SystemMetadata)> {
        let mut statuses = Vec::with_capacity(outcomes.len());
        for outcome in outcomes {
            statuses.push(self.reconcile(outcome)?);
        }

        let updated = statuses
            .iter()
            .filter(|s| **s == ReconcileStatus::Updated)
            .count();
        info!(
            total = outcomes.len(),
            updated,
            skipped = outcomes.len() - updated,
            "reconciliation batch complete"
        );

        let meta = PhaseCalibrator::new(Arc::clone(&self.storage)).recalculate()?;
        Ok((statuses, meta))
    }
}
