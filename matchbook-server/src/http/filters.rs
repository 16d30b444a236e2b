//! GET /filters: distinct values for client filter dropdowns.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct FiltersResponse {
    pub tournaments: Vec<String>,
    pub surfaces: Vec<String>,
    pub learning_phases: Vec<String>,
}

/// GET /filters
pub async fn get_filters(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.store.distinct_filter_values() {
        Ok(values) => Json(FiltersResponse {
            tournaments: values.tournaments,
            surfaces: values.surfaces,
            learning_phases: values.learning_phases,
        })
        .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "filter values lookup failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": "internal server error" })),
            )
                .into_response()
        }
    }
}
