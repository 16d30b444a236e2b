use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::constants;
use crate::models::{LearningPhase, Prediction};

/// Optional equality/range predicates over stored predictions.
/// Every field is optional; unset fields add no clause.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PredictionFilter {
    /// Case-insensitive substring match over tournament and player names.
    pub search: Option<String>,
    pub tournament: Option<String>,
    pub surface: Option<String>,
    pub learning_phase: Option<LearningPhase>,
    pub recommended_action: Option<String>,
    pub value_bet: Option<bool>,
    pub prediction_correct: Option<bool>,
    pub min_confidence: Option<u8>,
    pub max_confidence: Option<u8>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

/// Sort keys the query service will accept. Anything else falls back to
/// the default; a requested key is never interpolated into query text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    PredictionDay,
    CreatedAt,
    ConfidenceScore,
    SystemAccuracy,
    /// The odds posted for the predicted player (derived expression).
    PredictedOdds,
}

impl SortKey {
    /// Parse a client-supplied key, falling back to the default.
    pub fn parse_or_default(raw: &str) -> Self {
        match raw {
            "prediction_day" => Self::PredictionDay,
            "created_at" => Self::CreatedAt,
            "confidence_score" => Self::ConfidenceScore,
            "system_accuracy" => Self::SystemAccuracy,
            "predicted_odds" => Self::PredictedOdds,
            _ => Self::default(),
        }
    }
}

/// Sort direction, defaulting to descending (newest first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDir {
    Asc,
    #[default]
    Desc,
}

impl SortDir {
    /// Parse a client-supplied direction, falling back to the default.
    pub fn parse_or_default(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "asc" => Self::Asc,
            "desc" => Self::Desc,
            _ => Self::default(),
        }
    }
}

/// Pagination request, clamped to safe bounds on construction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: u32,
    pub page_size: u32,
}

impl PageRequest {
    /// Clamp page to >= 1 and page_size to `1..=MAX_PAGE_SIZE`.
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.clamp(1, constants::MAX_PAGE_SIZE),
        }
    }

    /// Row offset for this page. Widened to u64 so an absurd client-supplied
    /// page number yields an offset past the data instead of overflowing.
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, constants::DEFAULT_PAGE_SIZE)
    }
}

/// One page of predictions plus the unpaginated total, so clients can
/// render pagination controls without a second round trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionPage {
    pub rows: Vec<Prediction>,
    pub total: u32,
}

impl PredictionPage {
    /// Total pages for a given page size, by integer ceiling division.
    pub fn total_pages(total: u32, page_size: u32) -> u32 {
        if page_size == 0 {
            0
        } else {
            total.div_ceil(page_size)
        }
    }
}

/// Distinct values currently present in the store, for filter dropdowns.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterValues {
    pub tournaments: Vec<String>,
    pub surfaces: Vec<String>,
    pub learning_phases: Vec<String>,
}
