//! AgriClaim Cloud API — crop diagnosis REST server.
//!
//! Accepts leaf-photo uploads, runs the confidence-gated diagnosis
//! pipeline, and serves compensation estimates and agronomist
//! recommendations.

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use ac_cloud_api::config::ApiConfig;
use ac_cloud_api::routes;
use ac_cloud_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "ac-cloud-api starting");

    let config = ApiConfig::from_env();
    let state = AppState::from_env();

    let app = routes::build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "listening");

    axum::serve(listener, app).await?;

    Ok(())
}
