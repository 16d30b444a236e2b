//! Shared application state.

use std::sync::Arc;

use matchbook_core::constants;
use matchbook_core::traits::IPredictionStore;

/// State shared across all request handlers. The store is read-only from
/// the server's perspective and safe under arbitrary concurrency.
pub struct AppState {
    pub store: Arc<dyn IPredictionStore>,
    /// Page size used when the client does not send one.
    pub default_page_size: u32,
    /// Upper bound applied to client-supplied page sizes.
    pub max_page_size: u32,
}

impl AppState {
    pub fn new(store: Arc<dyn IPredictionStore>) -> Self {
        Self {
            store,
            default_page_size: constants::DEFAULT_PAGE_SIZE,
            max_page_size: constants::MAX_PAGE_SIZE,
        }
    }

    /// Override the page-size limits from configuration.
    pub fn with_page_limits(mut self, default_page_size: u32, max_page_size: u32) -> Self {
        self.default_page_size = default_page_size;
        self.max_page_size = max_page_size;
        self
    }
}
