//! Server error types

use thiserror::Error;

/// Errors that can occur in the matchbook server
#[derive(Debug, Error)]
pub enum ServerError {
    /// Failed to bind to the specified address
    #[error("failed to bind to {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// Storage failure surfaced while serving a request
    #[error("storage error: {0}")]
    Storage(#[from] matchbook_core::MatchbookError),

    /// Internal server error
    #[error("internal error: {0}")]
    Internal(String),
}
