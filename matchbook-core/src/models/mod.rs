//! Domain models: predictions, outcomes, system metadata, learning log.

mod bucket;
mod learning_log;
mod metadata;
mod phase;
mod prediction;
mod query;

pub use bucket::ConfidenceBucket;
pub use learning_log::LearningLogEntry;
pub use metadata::{BucketAccuracy, SystemMetadata};
pub use phase::LearningPhase;
pub use prediction::{InsertOutcome, MatchOutcome, Prediction, ReconcileStatus};
pub use query::{FilterValues, PageRequest, PredictionFilter, PredictionPage, SortDir, SortKey};
