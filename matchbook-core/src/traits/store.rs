use chrono::NaiveDate;

use crate::errors::MatchbookResult;
use crate::match_key::MatchKey;
use crate::models::{
    ConfidenceBucket, FilterValues, InsertOutcome, LearningLogEntry, PageRequest,
    PredictionFilter, PredictionPage, Prediction, SortDir, SortKey, SystemMetadata,
};

/// Persistence seam for predictions, metadata, and the learning log.
///
/// All cross-run safety lives behind this trait: the uniqueness constraint
/// on the match key and the conditional outcome update. Implementations
/// must be safe to call from overlapping batch jobs.
pub trait IPredictionStore: Send + Sync {
    // --- Write path ---

    /// Insert a prediction unless one already exists for its match key.
    /// A duplicate is never an error. Confidence above the current phase
    /// ceiling is rejected with `ConfidenceAboveCeiling`.
    fn insert_if_absent(&self, prediction: &Prediction) -> MatchbookResult<InsertOutcome>;

    // --- Read path ---

    fn get(&self, match_key: &MatchKey) -> MatchbookResult<Option<Prediction>>;

    /// Predictions for a given day whose outcome is still unknown.
    fn list_unresolved(&self, day: NaiveDate) -> MatchbookResult<Vec<Prediction>>;

    /// Filtered, sorted, paginated listing plus the unpaginated total.
    fn list(
        &self,
        filter: &PredictionFilter,
        sort: SortKey,
        dir: SortDir,
        page: PageRequest,
    ) -> MatchbookResult<PredictionPage>;

    /// Distinct tournaments/surfaces/phases currently present.
    fn distinct_filter_values(&self) -> MatchbookResult<FilterValues>;

    // --- Reconciliation ---

    /// Conditionally apply an outcome: only succeeds if `actual_winner` is
    /// still NULL (first writer wins). Returns true if the row was updated.
    fn apply_outcome(
        &self,
        match_key: &MatchKey,
        actual_winner: &str,
        correct: bool,
        bucket: ConfidenceBucket,
    ) -> MatchbookResult<bool>;

    // --- System metadata ---

    /// Load the metadata singleton, initializing it at bootstrap.
    fn load_metadata(&self) -> MatchbookResult<SystemMetadata>;

    /// Recompute all counters and ratios from stored predictions and persist
    /// the given phase state, inside a single transaction.
    fn recompute_metadata(&self, days_operated: u32) -> MatchbookResult<SystemMetadata>;

    // --- Learning log ---

    fn append_learning_log(&self, entry: &LearningLogEntry) -> MatchbookResult<()>;

    fn recent_learning_log(&self, limit: usize) -> MatchbookResult<Vec<LearningLogEntry>>;
}
