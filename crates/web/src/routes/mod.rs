use std::sync::Arc;

use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use crate::AppState;

pub mod analysis;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/resolve", post(analysis::resolve))
        .route("/evaluate", post(analysis::evaluate_position))
        .route("/attacks", post(analysis::attacks))
        .route("/replay", post(analysis::replay))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
