//! # matchbook-core
//!
//! Foundation crate for the matchbook prediction tracker.
//! Defines all types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod match_key;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::MatchbookConfig;
pub use errors::{MatchbookError, MatchbookResult};
pub use match_key::MatchKey;
pub use models::{
    ConfidenceBucket, InsertOutcome, LearningLogEntry, LearningPhase, MatchOutcome, Prediction,
    ReconcileStatus, SystemMetadata,
};
