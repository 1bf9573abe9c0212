//! API route definitions and router builder.

pub mod compensation;
pub mod diagnose;
pub mod health;
pub mod recommend;

use axum::Router;
use axum::routing::{get, post};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route("/diagnose", post(diagnose::diagnose))
        .route("/diagnoses", get(diagnose::list_diagnoses))
        .route("/compensation", post(compensation::calculate))
        .route("/recommend", post(recommend::recommend));

    Router::new()
        .route("/health", get(health::health))
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
        .with_state(state)
}
