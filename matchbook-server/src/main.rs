use std::process::ExitCode;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use matchbook_core::MatchbookConfig;
use matchbook_server::{AppState, MatchbookServer};
use matchbook_storage::StorageEngine;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match MatchbookConfig::load_from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "failed to load configuration");
            return ExitCode::FAILURE;
        }
    };

    let engine = match StorageEngine::open(&config.database_path) {
        Ok(engine) => engine,
        Err(e) => {
            tracing::error!(
                error = %e,
                path = %config.database_path.display(),
                "failed to open prediction store"
            );
            return ExitCode::FAILURE;
        }
    };

    let state = Arc::new(
        AppState::new(Arc::new(engine))
            .with_page_limits(config.default_page_size, config.max_page_size),
    );
    let server = MatchbookServer::new(config.bind_addr.clone(), state);

    if let Err(e) = server.run().await {
        tracing::error!(error = %e, "server exited with error");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
