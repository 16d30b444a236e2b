//! Error types shared across the workspace.

mod storage_error;

pub use storage_error::StorageError;

/// Convenience alias used by every fallible operation in the workspace.
pub type MatchbookResult<T> = Result<T, MatchbookError>;

/// Aggregate error type for the matchbook system.
#[derive(Debug, thiserror::Error)]
pub enum MatchbookError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// A prediction's confidence exceeds the phase ceiling. This indicates a
    /// bug in the upstream generator or calibrator and must not be silently
    /// corrected, so it is a hard error rather than a clamp.
    #[error("confidence {confidence} exceeds phase ceiling {ceiling}")]
    ConfidenceAboveCeiling { confidence: u8, ceiling: u8 },

    #[error("prediction not found: {match_key}")]
    PredictionNotFound { match_key: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for MatchbookError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}
