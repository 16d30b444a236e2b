//! # matchbook-storage
//!
//! SQLite persistence for the prediction tracker: connection pool,
//! versioned migrations, parameterized query modules, and the
//! `StorageEngine` implementing `IPredictionStore`.

pub mod engine;
pub mod migrations;
pub mod pool;
pub mod queries;

pub use engine::StorageEngine;

use matchbook_core::errors::{MatchbookError, StorageError};

/// Wrap a driver error message in the storage error type.
pub(crate) fn to_storage_err(message: String) -> MatchbookError {
    MatchbookError::Storage(StorageError::Sqlite { message })
}
