//! Liveness endpoint.

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::AppState;

/// Liveness report.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always `healthy` while the process serves requests.
    pub status: &'static str,
    /// Service name.
    pub service: &'static str,
    /// Crate version.
    pub version: &'static str,
    /// Blob store provider the pipeline reads from.
    pub storage: &'static str,
}

async fn health_check<H>(State(state): State<AppState<H>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "imor",
        version: env!("CARGO_PKG_VERSION"),
        storage: state.storage_provider,
    })
}

/// GET `/health`
pub fn routes<H: Send + Sync + 'static>() -> Router<AppState<H>> {
    Router::new().route("/health", get(health_check::<H>))
}
