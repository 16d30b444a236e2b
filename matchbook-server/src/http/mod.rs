//! HTTP router.

mod filters;
mod predictions;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};

use crate::state::AppState;

pub use filters::FiltersResponse;
pub use predictions::{ListMeta, PredictionsResponse};

/// Create the HTTP router with all routes configured.
/// CORS is permissive for GET, matching the dashboard deployment model.
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([axum::http::Method::GET])
        .allow_headers(Any);

    Router::new()
        .route("/predictions", get(predictions::list_predictions))
        .route("/filters", get(filters::get_filters))
        .route("/healthz", get(healthz))
        .layer(cors)
        .with_state(state)
}

/// GET /healthz
async fn healthz() -> &'static str {
    "ok"
}
