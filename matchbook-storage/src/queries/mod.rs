//! Parameterized query modules, one per concern.

pub mod learning_log_ops;
pub mod metadata_ops;
pub mod prediction_crud;
pub mod prediction_query;
pub mod reconcile_ops;
