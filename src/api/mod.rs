// Copyright (c) Recipe Social Team
// SPDX-License-Identifier: Apache-2.0

mod extract;
mod handlers;
mod routes;

pub use routes::router;

use crate::auth::TokenVerifier;
use crate::config::Config;
use crate::metrics::Metrics;
use crate::store::Store;
use anyhow::Result;
use axum::extract::FromRef;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub verifier: Arc<TokenVerifier>,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, verifier: TokenVerifier, metrics: Metrics) -> Self {
        Self {
            store,
            verifier: Arc::new(verifier),
            metrics: Arc::new(metrics),
        }
    }
}

impl FromRef<AppState> for Arc<TokenVerifier> {
    fn from_ref(state: &AppState) -> Self {
        state.verifier.clone()
    }
}

/// Start the API server and run until `shutdown` resolves
pub async fn start_api_server<F>(state: AppState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let config = Config::get();

    let app = router(state, config.server.enable_cors);

    let addr = format!("{}:{}", config.server.host, config.server.port)
        .parse::<SocketAddr>()?;

    info!("Starting API server on {}", addr);
    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}
