//! Productos API - REST server

use core_config::FromEnv;
use core_config::tracing::{init_tracing, install_color_eyre};
use database::common::RetryConfig;
use database::postgres::{connect_from_config_with_retry, run_migrations};
use migration::Migrator;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!("Connecting to PostgreSQL");
    let db = connect_from_config_with_retry(config.database.clone(), RetryConfig::default()).await?;

    run_migrations::<Migrator>(&db, config.app.name).await?;

    let state = AppState {
        config: config.clone(),
        db,
    };

    let app = api::app(&state)?;

    info!(
        "Starting {} v{} on port {}",
        config.app.name, config.app.version, config.server.port
    );

    let db = state.db.clone();
    axum_helpers::create_production_app(app, &config.server, async move {
        info!("Shutting down: closing PostgreSQL pool");
        if let Err(e) = db.close().await {
            tracing::warn!(error = %e, "Failed to close PostgreSQL pool");
        }
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Productos API shutdown complete");
    Ok(())
}
