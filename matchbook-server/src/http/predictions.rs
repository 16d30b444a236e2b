//! GET /predictions: filtered, sorted, paginated listing.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use matchbook_core::models::{
    LearningPhase, PageRequest, Prediction, PredictionFilter, PredictionPage, SortDir, SortKey,
};

use crate::state::AppState;

/// Raw query params. Everything is an optional string: malformed values are
/// dropped rather than failing the request, so the API stays tolerant of
/// client drift.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub page: Option<String>,
    pub page_size: Option<String>,
    pub search: Option<String>,
    pub tournament: Option<String>,
    pub surface: Option<String>,
    pub learning_phase: Option<String>,
    pub recommended_action: Option<String>,
    pub value_bet: Option<String>,
    pub prediction_correct: Option<String>,
    pub min_confidence: Option<String>,
    pub max_confidence: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub sort_by: Option<String>,
    pub sort_dir: Option<String>,
}

impl ListQuery {
    fn filter(&self) -> PredictionFilter {
        PredictionFilter {
            search: non_empty(&self.search),
            tournament: non_empty(&self.tournament),
            surface: non_empty(&self.surface),
            learning_phase: self
                .learning_phase
                .as_deref()
                .and_then(LearningPhase::parse),
            recommended_action: non_empty(&self.recommended_action),
            value_bet: parse_opt_bool(&self.value_bet),
            prediction_correct: parse_opt_bool(&self.prediction_correct),
            min_confidence: parse_opt(&self.min_confidence),
            max_confidence: parse_opt(&self.max_confidence),
            date_from: parse_opt_date(&self.date_from),
            date_to: parse_opt_date(&self.date_to),
        }
    }

    /// Build the page request against the configured limits: the default
    /// applies when the client sends nothing, and the configured maximum
    /// caps whatever the client asks for.
    fn page(&self, default_page_size: u32, max_page_size: u32) -> PageRequest {
        let page = parse_opt::<u32>(&self.page).unwrap_or(1);
        let page_size = parse_opt::<u32>(&self.page_size)
            .unwrap_or(default_page_size)
            .min(max_page_size);
        PageRequest::new(page, page_size)
    }

    fn sort(&self) -> (SortKey, SortDir) {
        (
            SortKey::parse_or_default(self.sort_by.as_deref().unwrap_or("")),
            SortDir::parse_or_default(self.sort_dir.as_deref().unwrap_or("")),
        )
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn parse_opt<T: std::str::FromStr>(value: &Option<String>) -> Option<T> {
    value.as_deref().and_then(|s| s.trim().parse().ok())
}

fn parse_opt_bool(value: &Option<String>) -> Option<bool> {
    match value.as_deref().map(str::trim) {
        Some("true") | Some("1") => Some(true),
        Some("false") | Some("0") => Some(false),
        _ => None,
    }
}

fn parse_opt_date(value: &Option<String>) -> Option<NaiveDate> {
    value
        .as_deref()
        .and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok())
}

#[derive(Debug, Serialize)]
pub struct ListMeta {
    pub total: u32,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
}

#[derive(Debug, Serialize)]
pub struct PredictionsResponse {
    pub data: Vec<Prediction>,
    pub meta: ListMeta,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// GET /predictions
pub async fn list_predictions(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> impl IntoResponse {
    let filter = query.filter();
    let page = query.page(state.default_page_size, state.max_page_size);
    let (sort, dir) = query.sort();

    match state.store.list(&filter, sort, dir, page) {
        Ok(result) => {
            let total_pages = PredictionPage::total_pages(result.total, page.page_size);
            Json(PredictionsResponse {
                data: result.rows,
                meta: ListMeta {
                    total: result.total,
                    page: page.page,
                    page_size: page.page_size,
                    total_pages,
                },
            })
            .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "prediction listing failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "internal server error".into(),
                }),
            )
                .into_response()
        }
    }
}
