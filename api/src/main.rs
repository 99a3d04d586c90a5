use actix_web::{web, HttpServer};
use anyhow::Context;
use dotenv::dotenv;
use log::{info, warn};
use std::sync::Arc;

use td_api::app::{create_app, AppState};
use td_api::config::Config;
use td_core::{AuditService, InMemoryUserDirectory, RevocationSweeper};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    let config = Config::load().context("failed to load configuration")?;

    // Initialize logger; RUST_LOG still wins over the configured level
    env_logger::init_from_env(
        env_logger::Env::new().default_filter_or(config.app.logging.level.as_str()),
    );

    info!(
        "Starting Taskdeck API Server ({} environment)",
        config.app.environment
    );

    let directory = InMemoryUserDirectory::from_seed(&config.seed_users)
        .context("invalid SEED_USERS")?;
    if directory.is_empty() {
        warn!("User directory is empty, every login will fail");
    } else {
        info!("Loaded {} user(s) into the directory", directory.len());
    }

    let state = AppState::build(
        config.app.auth.clone(),
        Arc::new(directory),
        AuditService::tracing(),
    )
    .context("failed to initialise token authentication")?;

    if !config.jwt_enabled() {
        warn!("JWT authentication is disabled, protected endpoints expect an external auth layer");
    }

    let sweeper = RevocationSweeper::start(Arc::clone(state.registry()), config.sweep_interval());

    let state = web::Data::new(state);
    let cors = config.app.cors.clone();
    let bind_address = config.app.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let mut server = HttpServer::new(move || create_app(state.clone(), &cors));
    if config.app.server.workers > 0 {
        server = server.workers(config.app.server.workers);
    }

    let result = server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await;

    info!("Server stopped, shutting down revocation sweeper");
    sweeper.shutdown().await;

    result.context("server error")
}
