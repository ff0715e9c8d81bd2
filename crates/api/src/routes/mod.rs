//! API route definitions.

use axum::Router;

use imor_core::pipeline::BlobEventHandler;

use crate::AppState;

pub mod events;
pub mod health;

/// Creates the API router with all routes.
pub fn api_routes<H: BlobEventHandler>() -> Router<AppState<H>> {
    Router::new()
        .merge(health::routes())
        .merge(events::routes())
}
