pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;

use api::{create_router, AppState};
use config::Config;

/// Builds state from `config`, binds the listener and serves until shutdown
pub async fn run(config: Config) -> anyhow::Result<()> {
    let state = AppState::from_config(&config).await?;
    let app = create_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(address = %address, backend = ?config.catalog_backend, "Server is running");

    axum::serve(listener, app).await?;
    Ok(())
}
