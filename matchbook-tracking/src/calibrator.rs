//! Learning-phase calibration: day counting, phase transitions, and
//! accuracy recomputation.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use matchbook_core::errors::MatchbookResult;
use matchbook_core::models::{LearningPhase, SystemMetadata};
use matchbook_core::traits::IPredictionStore;

/// Owns the system maturity state machine.
///
/// The phase is a pure function of days operated; accuracy is recomputed
/// from the full set of resolved predictions on every run, so calling this
/// twice in a day only refreshes the aggregates.
pub struct PhaseCalibrator {
    storage: Arc<dyn IPredictionStore>,
}

impl PhaseCalibrator {
    pub fn new(storage: Arc<dyn IPredictionStore>) -> Self {
        Self { storage }
    }

    /// Recalculate system metadata after a reconciliation batch.
    ///
    /// `days_operated` advances by the calendar days elapsed since the last
    /// update; a same-day rerun advances nothing. The phase and confidence
    /// ceiling follow from the new day count, and every accuracy counter is
    /// re-derived from stored predictions inside one transaction.
    pub fn recalculate(&self) -> MatchbookResult<SystemMetadata> {
        let current = self.storage.load_metadata()?;

        let today = Utc::now().date_naive();
        let elapsed = (today - current.last_updated.date_naive()).num_days().max(0) as u32;
        let days_operated = current.days_operated + elapsed;

        let meta = self.storage.recompute_metadata(days_operated)?;

        if meta.learning_phase != current.learning_phase {
            info!(
                from = %current.learning_phase,
                to = %meta.learning_phase,
                days_operated,
                ceiling = meta.max_confidence_allowed,
                "learning phase advanced"
            );
        }
        info!(
            days_operated,
            accuracy_pct = meta.accuracy_pct,
            resolved = meta.total_resolved,
            "metadata recalculated"
        );
        Ok(meta)
    }

    /// The confidence ceiling that applies for a given day count.
    pub fn ceiling_for_days(days_operated: u32) -> u8 {
        LearningPhase::for_days(days_operated).max_confidence()
    }
}
