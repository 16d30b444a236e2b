use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::LearningPhase;

/// Per-bucket accuracy aggregates, recomputed from resolved predictions.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct BucketAccuracy {
    pub total: u32,
    pub correct: u32,
}

impl BucketAccuracy {
    /// Accuracy as a percentage, 0.0 when the bucket is empty.
    pub fn accuracy_pct(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            f64::from(self.correct) * 100.0 / f64::from(self.total)
        }
    }
}

/// Singleton system maturity state.
///
/// Every counter is derived from the predictions table by the calibrator.
/// Nothing here is incremented in place, so overlapping reconciliation
/// batches cannot double count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemMetadata {
    pub days_operated: u32,
    pub learning_phase: LearningPhase,
    /// Cumulative accuracy over all resolved predictions, percent.
    pub accuracy_pct: f64,
    pub total_resolved: u32,
    pub correct_count: u32,
    pub incorrect_count: u32,
    pub high_bucket: BucketAccuracy,
    pub medium_bucket: BucketAccuracy,
    pub low_bucket: BucketAccuracy,
    pub max_confidence_allowed: u8,
    pub last_updated: DateTime<Utc>,
}

impl SystemMetadata {
    /// Bootstrap state: zeroed counters, lowest phase.
    pub fn bootstrap(now: DateTime<Utc>) -> Self {
        Self {
            days_operated: 0,
            learning_phase: LearningPhase::Collection,
            accuracy_pct: 0.0,
            total_resolved: 0,
            correct_count: 0,
            incorrect_count: 0,
            high_bucket: BucketAccuracy::default(),
            medium_bucket: BucketAccuracy::default(),
            low_bucket: BucketAccuracy::default(),
            max_confidence_allowed: LearningPhase::Collection.max_confidence(),
            last_updated: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bootstrap_is_zeroed_collection() {
        let meta = SystemMetadata::bootstrap(Utc::now());
        assert_eq!(meta.days_operated, 0);
        assert_eq!(meta.learning_phase, LearningPhase::Collection);
        assert_eq!(meta.max_confidence_allowed, 60);
        assert_eq!(meta.total_resolved, 0);
    }

    #[test]
    fn empty_bucket_accuracy_is_zero() {
        let bucket = BucketAccuracy::default();
        assert_eq!(bucket.accuracy_pct(), 0.0);
    }

    #[test]
    fn bucket_accuracy_pct() {
        let bucket = BucketAccuracy { total: 4, correct: 3 };
        assert!((bucket.accuracy_pct() - 75.0).abs() < f64::EPSILON);
    }
}
