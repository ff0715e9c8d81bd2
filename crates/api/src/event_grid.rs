//! Event Grid wire types.
//!
//! Deliveries use the Event Grid event schema: a JSON array of events, each
//! with an `eventType` and a `data` payload whose shape depends on the type.

use serde::{Deserialize, Serialize};

use imor_core::trigger::BlobCreatedEvent;

/// Event type raised when a blob is created or replaced.
pub const BLOB_CREATED: &str = "Microsoft.Storage.BlobCreated";

/// Event type of the subscription validation handshake.
pub const SUBSCRIPTION_VALIDATION: &str = "Microsoft.EventGrid.SubscriptionValidationEvent";

/// One event in an Event Grid delivery.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventGridEvent {
    /// Unique event ID.
    #[serde(default)]
    pub id: String,
    /// Event type, e.g. [`BLOB_CREATED`].
    pub event_type: String,
    /// Publisher-defined subject, e.g. `/blobServices/default/containers/images/blobs/cat.png`.
    #[serde(default)]
    pub subject: String,
    /// Time the event was raised (RFC 3339).
    #[serde(default)]
    pub event_time: Option<String>,
    /// Event payload.
    #[serde(default)]
    pub data: serde_json::Value,
    /// Schema version of `data`.
    #[serde(default)]
    pub data_version: Option<String>,
    /// Source topic.
    #[serde(default)]
    pub topic: Option<String>,
}

/// Payload of the subscription validation event.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubscriptionValidationData {
    validation_code: String,
}

/// Reply that completes the subscription validation handshake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionValidationResponse {
    /// The `validationCode` received.
    pub validation_response: String,
}

/// What an event asks the webhook to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventAction {
    /// Answer the validation handshake with this code.
    Validate(String),
    /// Run the pipeline for a new blob.
    Process(BlobCreatedEvent),
    /// Nothing; the event type is not handled.
    Ignore,
}

impl EventGridEvent {
    /// Decodes `data` according to `eventType`.
    ///
    /// # Errors
    ///
    /// Returns an error if `data` does not match the shape of a handled type.
    pub fn action(&self) -> Result<EventAction, serde_json::Error> {
        if self.event_type.eq_ignore_ascii_case(SUBSCRIPTION_VALIDATION) {
            let data = SubscriptionValidationData::deserialize(&self.data)?;
            Ok(EventAction::Validate(data.validation_code))
        } else if self.event_type.eq_ignore_ascii_case(BLOB_CREATED) {
            BlobCreatedEvent::deserialize(&self.data).map(EventAction::Process)
        } else {
            Ok(EventAction::Ignore)
        }
    }
}
