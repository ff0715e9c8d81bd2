//! Event Grid webhook host with Axum routes.
//!
//! This crate provides:
//! - The Event Grid delivery endpoint that feeds the image pipeline
//! - Subscription validation handshake
//! - Health check
//! - Error responses

pub mod error;
pub mod event_grid;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;

use imor_core::pipeline::BlobEventHandler;

pub use error::ApiError;

/// Application state shared across handlers.
pub struct AppState<H> {
    /// Pipeline entry point for blob-created events.
    pub handler: Arc<H>,
    /// Name of the blob store provider, reported by the health check.
    pub storage_provider: &'static str,
}

impl<H> Clone for AppState<H> {
    fn clone(&self) -> Self {
        Self {
            handler: Arc::clone(&self.handler),
            storage_provider: self.storage_provider,
        }
    }
}

/// Creates the main application router.
pub fn create_router<H: BlobEventHandler>(
    handler: Arc<H>,
    storage_provider: &'static str,
) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes::<H>())
        .layer(TraceLayer::new_for_http())
        .with_state(AppState {
            handler,
            storage_provider,
        })
}
