//! Image ingestion pipeline.
//!
//! One blob-created event runs through a linear state machine:
//!
//! ```text
//! Start ─► InputChecked ─► FormatChecked ─► Analyzed ─► Published ─► Done
//!   │            │ (unsupported format) ──────────────────────────────▲
//!   └────────────┴──────────────┴──────────────┴─► Aborted
//! ```
//!
//! There is no retry: an aborted invocation is reported to the caller, which
//! owns redelivery.

mod error;
mod service;
mod state;

pub use error::{PipelineError, PipelineErrorKind};
pub use service::{BlobEventHandler, ImageProcessor, ProcessingOutcome, SkipReason};
pub use state::PipelineState;

#[cfg(test)]
mod tests;
