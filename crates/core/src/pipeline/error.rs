//! Pipeline error types.

use thiserror::Error;

use imor_shared::AppError;

use super::state::PipelineState;
use crate::remote::ServiceError;
use crate::storage::StorageError;

/// Why an invocation aborted.
#[derive(Debug, Error)]
pub enum PipelineErrorKind {
    /// No readable blob exists at the event URL.
    #[error("no input blob at {0}")]
    MissingInput(String),

    /// Blob store failed while opening the input.
    #[error("blob store error: {0}")]
    Storage(#[from] StorageError),

    /// Vision analysis failed.
    #[error("analysis failed: {0}")]
    Analysis(#[source] ServiceError),

    /// Vision analysis succeeded but returned no caption.
    #[error("analysis returned no caption for {0}")]
    NoCaption(String),

    /// Storing the metadata record failed.
    #[error("publish failed: {0}")]
    Publish(#[source] ServiceError),
}

/// An aborted invocation and the state it aborted from.
#[derive(Debug, Error)]
#[error("pipeline aborted at {state}: {kind}")]
pub struct PipelineError {
    /// Last state reached before aborting.
    pub state: PipelineState,
    /// Cause.
    #[source]
    pub kind: PipelineErrorKind,
}

impl PipelineError {
    /// Create a pipeline error.
    #[must_use]
    pub fn new(state: PipelineState, kind: PipelineErrorKind) -> Self {
        Self { state, kind }
    }
}

impl From<PipelineError> for AppError {
    fn from(err: PipelineError) -> Self {
        let message = err.to_string();
        match err.kind {
            PipelineErrorKind::MissingInput(_) => Self::NotFound(message),
            PipelineErrorKind::Storage(_) => Self::Storage(message),
            PipelineErrorKind::Analysis(_)
            | PipelineErrorKind::NoCaption(_)
            | PipelineErrorKind::Publish(_) => Self::ExternalService(message),
        }
    }
}
