use axum_helpers::create_app;
use core_config::tracing::{init_tracing, install_color_eyre};
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // A .env file is optional; real environment variables win
    let dotenv = dotenvy::dotenv();

    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    // Initialize tracing with ErrorLayer for span trace capture
    init_tracing(&config.environment);

    if let Ok(path) = dotenv {
        info!("Loaded environment from {}", path.display());
    }

    observability::init_metrics()
        .map_err(|e| eyre::eyre!("Failed to install metrics recorder: {}", e))?;

    // Clients are built once here and injected into the search service
    let state = AppState::build(config).await?;

    // Routes plus docs, fallback and middleware
    let router = api::build_router(&state)?;

    info!(
        "Starting {} v{} ({:?})",
        state.config.app.name, state.config.app.version, state.config.environment
    );

    create_app(router, &state.config.server).await?;

    info!("CiteCrawler API shutdown complete");
    Ok(())
}
