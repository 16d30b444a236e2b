//! StorageEngine: owns the ConnectionPool, implements IPredictionStore,
//! runs startup migrations, and routes reads and writes.

use std::path::Path;

use chrono::NaiveDate;

use matchbook_core::errors::{MatchbookError, MatchbookResult};
use matchbook_core::models::{
    ConfidenceBucket, FilterValues, InsertOutcome, LearningLogEntry, PageRequest,
    PredictionFilter, PredictionPage, Prediction, SortDir, SortKey, SystemMetadata,
};
use matchbook_core::traits::IPredictionStore;
use matchbook_core::MatchKey;

use crate::migrations;
use crate::pool::ConnectionPool;

/// The main storage engine. Owns the connection pool and provides the full
/// IPredictionStore interface.
pub struct StorageEngine {
    pool: ConnectionPool,
    /// When true, use the read pool for read operations (file-backed mode).
    /// When false, route all reads through the writer (in-memory mode,
    /// because in-memory read pool connections are isolated databases).
    use_read_pool: bool,
}

impl StorageEngine {
    /// Open a storage engine backed by a file on disk.
    pub fn open(path: &Path) -> MatchbookResult<Self> {
        let pool = ConnectionPool::open(path, 4)?;
        let engine = Self { pool, use_read_pool: true };
        engine.initialize()?;
        Ok(engine)
    }

    /// Open an in-memory storage engine (for testing).
    pub fn open_in_memory() -> MatchbookResult<Self> {
        let pool = ConnectionPool::open_in_memory(1)?;
        let engine = Self { pool, use_read_pool: false };
        engine.initialize()?;
        Ok(engine)
    }

    /// Run migrations on the writer.
    fn initialize(&self) -> MatchbookResult<()> {
        self.pool.writer.with_conn_sync(|conn| {
            migrations::run_migrations(conn)?;
            Ok(())
        })
    }

    /// Get a reference to the connection pool (for advanced operations).
    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }

    /// Execute a read-only query on the best available connection.
    fn with_reader<F, T>(&self, f: F) -> MatchbookResult<T>
    where
        F: FnOnce(&rusqlite::Connection) -> MatchbookResult<T>,
    {
        if self.use_read_pool {
            self.pool.readers.with_conn(f)
        } else {
            self.pool.writer.with_conn_sync(f)
        }
    }
}

impl IPredictionStore for StorageEngine {
    fn insert_if_absent(&self, prediction: &Prediction) -> MatchbookResult<InsertOutcome> {
        // The ceiling check reads current metadata and must see the same
        // connection state as the insert, so both run on the writer.
        self.pool.writer.with_conn_sync(|conn| {
            let meta = crate::queries::metadata_ops::load_metadata(conn)?;
            if prediction.confidence_score > meta.max_confidence_allowed {
                return Err(MatchbookError::ConfidenceAboveCeiling {
                    confidence: prediction.confidence_score,
                    ceiling: meta.max_confidence_allowed,
                });
            }
            crate::queries::prediction_crud::insert_if_absent(conn, prediction)
        })
    }

    fn get(&self, match_key: &MatchKey) -> MatchbookResult<Option<Prediction>> {
        self.with_reader(|conn| crate::queries::prediction_crud::get_prediction(conn, match_key))
    }

    fn list_unresolved(&self, day: NaiveDate) -> MatchbookResult<Vec<Prediction>> {
        self.with_reader(|conn| crate::queries::prediction_crud::list_unresolved(conn, day))
    }

    fn list(
        &self,
        filter: &PredictionFilter,
        sort: SortKey,
        dir: SortDir,
        page: PageRequest,
    ) -> MatchbookResult<PredictionPage> {
        self.with_reader(|conn| {
            crate::queries::prediction_query::list_predictions(conn, filter, sort, dir, page)
        })
    }

    fn distinct_filter_values(&self) -> MatchbookResult<FilterValues> {
        self.with_reader(crate::queries::prediction_query::distinct_filter_values)
    }

    fn apply_outcome(
        &self,
        match_key: &MatchKey,
        actual_winner: &str,
        correct: bool,
        bucket: ConfidenceBucket,
    ) -> MatchbookResult<bool> {
        self.pool.writer.with_conn_sync(|conn| {
            crate::queries::reconcile_ops::apply_outcome(conn, match_key, actual_winner, correct, bucket)
        })
    }

    fn load_metadata(&self) -> MatchbookResult<SystemMetadata> {
        // Bootstrap writes the singleton on first access, so this routes
        // through the writer.
        self.pool
            .writer
            .with_conn_sync(crate::queries::metadata_ops::load_metadata)
    }

    fn recompute_metadata(&self, days_operated: u32) -> MatchbookResult<SystemMetadata> {
        self.pool.writer.with_conn_sync(|conn| {
            crate::queries::metadata_ops::recompute_metadata(conn, days_operated)
        })
    }

    fn append_learning_log(&self, entry: &LearningLogEntry) -> MatchbookResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| crate::queries::learning_log_ops::append_entry(conn, entry))
    }

    fn recent_learning_log(&self, limit: usize) -> MatchbookResult<Vec<LearningLogEntry>> {
        self.with_reader(|conn| crate::queries::learning_log_ops::recent_entries(conn, limit))
    }
}
