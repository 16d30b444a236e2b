//! # matchbook-tracking
//!
//! The batch-facing engines: prediction intake (morning write path),
//! result reconciliation (evening ingestion), and learning-phase
//! calibration. All cross-run safety is delegated to the store's
//! constraints; nothing here holds in-process locks across batches.

pub mod calibrator;
pub mod intake;
pub mod reconciler;

pub use calibrator::PhaseCalibrator;
pub use intake::PredictionIntake;
pub use reconciler::Reconciler;
