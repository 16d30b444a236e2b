//! # matchbook-server
//!
//! Read API over the prediction store. Serves `GET /predictions`,
//! `GET /filters`, and `GET /healthz` with permissive CORS for GET.

pub mod error;
pub mod http;
pub mod state;

use std::sync::Arc;

use tokio::net::TcpListener;

pub use error::ServerError;
pub use http::create_router;
pub use state::AppState;

/// The matchbook read API server.
pub struct MatchbookServer {
    bind_addr: String,
    state: Arc<AppState>,
}

impl MatchbookServer {
    pub fn new(bind_addr: impl Into<String>, state: Arc<AppState>) -> Self {
        Self {
            bind_addr: bind_addr.into(),
            state,
        }
    }

    /// Get the shared application state.
    pub fn state(&self) -> Arc<AppState> {
        Arc::clone(&self.state)
    }

    /// Run the server, binding to the configured address.
    pub async fn run(self) -> Result<(), ServerError> {
        let listener = TcpListener::bind(&self.bind_addr)
            .await
            .map_err(|e| ServerError::Bind {
                addr: self.bind_addr.clone(),
                source: e,
            })?;

        tracing::info!("matchbook server listening on {}", self.bind_addr);

        let router = create_router(self.state);
        axum::serve(listener, router)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))?;

        Ok(())
    }
}
