//! Event Grid delivery endpoint.

use axum::{
    Json, Router,
    extract::State,
    response::{IntoResponse, Response},
    routing::post,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::{debug, info};

use imor_core::pipeline::{BlobEventHandler, ProcessingOutcome};
use imor_shared::AppError;

use crate::{
    AppState, ApiError,
    event_grid::{EventAction, EventGridEvent, SubscriptionValidationResponse},
};

/// Creates the event routes.
pub fn routes<H: BlobEventHandler>() -> Router<AppState<H>> {
    Router::new().route("/events", post(receive_events::<H>))
}

/// Result of one delivery.
#[derive(Debug, Default, Serialize)]
pub struct DeliverySummary {
    /// Events whose metadata was published.
    pub processed: usize,
    /// Blob events skipped for an unsupported format.
    pub skipped: usize,
    /// Events of unhandled types.
    pub ignored: usize,
}

/// POST `/events`
/// Receive an Event Grid delivery.
///
/// Events are handled in order, one pipeline invocation each. The first
/// failure ends the delivery with a 5xx so Event Grid redelivers it.
async fn receive_events<H: BlobEventHandler>(
    State(state): State<AppState<H>>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let events: Vec<EventGridEvent> = serde_json::from_slice(&body)
        .map_err(|e| AppError::Validation(format!("invalid Event Grid payload: {e}")))?;

    let mut summary = DeliverySummary::default();

    for event in events {
        let action = event.action().map_err(|e| {
            AppError::Validation(format!("invalid data for {}: {e}", event.event_type))
        })?;

        match action {
            EventAction::Validate(validation_code) => {
                info!(event_id = %event.id, "Answering subscription validation");
                return Ok(Json(SubscriptionValidationResponse {
                    validation_response: validation_code,
                })
                .into_response());
            }
            EventAction::Process(blob) => {
                info!(event_id = %event.id, blob_url = %blob.url, "Blob created");
                match state.handler.handle(blob).await? {
                    ProcessingOutcome::Published(_) => summary.processed += 1,
                    ProcessingOutcome::Skipped(_) => summary.skipped += 1,
                }
            }
            EventAction::Ignore => {
                debug!(event_id = %event.id, event_type = %event.event_type, "Ignoring event");
                summary.ignored += 1;
            }
        }
    }

    Ok(Json(summary).into_response())
}
