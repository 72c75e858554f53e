use std::sync::Arc;

use anyhow::Context;
use bookshelf::shared::utils::init_logger;
use bookshelf::shared::{AppConfig, Database};
use bookshelf::{build_router, log_info, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logger();

    let config = AppConfig::from_env().context("failed to load configuration")?;
    log_info!("Starting bookshelf (story model: {})", config.ai.model);

    let database = Arc::new(Database::connect(&config.database_url)?);
    database.run_migrations()?;

    let state = AppState::new(&config, Arc::clone(&database))?;
    let router = build_router(state, &config.cors_origins)?;

    let addr = config.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    log_info!("Listening on {}", addr);

    axum::serve(listener, router).await.context("server error")?;
    Ok(())
}
