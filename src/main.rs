// Copyright (c) Recipe Social Team
// SPDX-License-Identifier: Apache-2.0

use anyhow::Result;
use dotenv::dotenv;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use recipe_social::api::{self, AppState};
use recipe_social::auth::TokenVerifier;
use recipe_social::config::Config;
use recipe_social::db::init_database;
use recipe_social::metrics::Metrics;
use recipe_social::store::PgStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if present
    dotenv().ok();

    // Load configuration
    let config = Config::init()?;

    // Initialize tracing
    let json = config.logging.format.eq_ignore_ascii_case("json");
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,recipe_social=debug".into()),
        ))
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(|| tracing_subscriber::fmt::layer()))
        .init();
    info!("Initialized configuration");

    // Initialize database
    let db = Arc::new(init_database(&config.database).await?);
    info!("Connected to database");

    let state = AppState::new(
        Arc::new(PgStore::new(db)),
        TokenVerifier::new(&config.auth),
        Metrics::new()?,
    );

    let shutdown = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Shutdown signal received, initiating graceful shutdown"),
            Err(e) => error!("Failed to listen for shutdown signal: {}", e),
        }
    };

    api::start_api_server(state, shutdown).await?;

    info!("Recipe social API shutdown complete");
    Ok(())
}
