//! Pipeline orchestration.

use std::sync::Arc;

use tracing::{debug, error, info, instrument, warn};

use super::error::{PipelineError, PipelineErrorKind};
use super::state::PipelineState;
use crate::analysis::ImageAnalyzer;
use crate::format::ImageFormat;
use crate::publish::{ImageMetadataRecord, MetadataPublisher};
use crate::storage::BlobSource;
use crate::trigger::BlobCreatedEvent;

/// Why an event finished without publishing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// File extension is not a supported image format.
    UnsupportedFormat {
        /// Extension as found in the URL, possibly empty.
        extension: String,
    },
}

/// Successful end of an invocation; both variants end in [`PipelineState::Done`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessingOutcome {
    /// Record was stored.
    Published(ImageMetadataRecord),
    /// Event was deliberately ignored.
    Skipped(SkipReason),
}

/// Handles one blob-created event per call.
///
/// Implemented by [`ImageProcessor`]; the webhook host depends only on this.
pub trait BlobEventHandler: Send + Sync + 'static {
    /// Run one invocation for `event`.
    fn handle(
        &self,
        event: BlobCreatedEvent,
    ) -> impl std::future::Future<Output = Result<ProcessingOutcome, PipelineError>> + Send;
}

/// State of one invocation.
struct Run {
    state: PipelineState,
}

impl Run {
    const fn new() -> Self {
        Self {
            state: PipelineState::Start,
        }
    }

    fn advance(&mut self, next: PipelineState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "illegal transition {} -> {next}",
            self.state
        );
        debug!(from = %self.state, to = %next, "Pipeline transition");
        self.state = next;
    }

    fn abort(&self, kind: PipelineErrorKind) -> PipelineError {
        error!(state = %self.state, error = %kind, "Pipeline aborted");
        PipelineError::new(self.state, kind)
    }
}

/// Runs blob-created events through analysis and publishing.
pub struct ImageProcessor<B, A, P> {
    blobs: Arc<B>,
    analyzer: Arc<A>,
    publisher: Arc<P>,
}

impl<B: BlobSource, A: ImageAnalyzer, P: MetadataPublisher> ImageProcessor<B, A, P> {
    /// Create a processor from its collaborators.
    #[must_use]
    pub fn new(blobs: Arc<B>, analyzer: Arc<A>, publisher: Arc<P>) -> Self {
        Self {
            blobs,
            analyzer,
            publisher,
        }
    }

    /// Process one event.
    ///
    /// The analysis call and the publish call are made one after the other,
    /// never concurrently. Nothing is retried.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No readable blob exists at the event URL
    /// - The blob store fails
    /// - The analysis call fails or yields no caption
    /// - The publish call fails
    #[instrument(skip(self, event), fields(blob_url = %event.url))]
    pub async fn process(
        &self,
        event: &BlobCreatedEvent,
    ) -> Result<ProcessingOutcome, PipelineError> {
        let mut run = Run::new();

        let input = match self.blobs.open(&event.url).await {
            Ok(Some(input)) => input,
            Ok(None) => {
                return Err(run.abort(PipelineErrorKind::MissingInput(event.url.clone())));
            }
            Err(e) => return Err(run.abort(e.into())),
        };
        run.advance(PipelineState::InputChecked);

        info!(
            name = %event.url,
            size = input.content_length,
            reported_size = event.size,
            "Processing blob"
        );

        let extension = event.extension();
        let Some(format) = ImageFormat::from_extension(extension) else {
            warn!(extension, "No encoder support, skipping");
            run.advance(PipelineState::Done);
            return Ok(ProcessingOutcome::Skipped(SkipReason::UnsupportedFormat {
                extension: extension.to_string(),
            }));
        };
        run.advance(PipelineState::FormatChecked);

        info!(
            format = %format,
            mime_type = format.mime_type(),
            encoder = format.encoder_name(),
            "Analyzing uploaded image"
        );
        let analysis = self
            .analyzer
            .analyze(&event.url)
            .await
            .map_err(|e| run.abort(PipelineErrorKind::Analysis(e)))?;
        info!(request_id = %analysis.request_id, "Analyzing done successfully");
        run.advance(PipelineState::Analyzed);

        let record = ImageMetadataRecord::from_analysis(event, &analysis)
            .ok_or_else(|| run.abort(PipelineErrorKind::NoCaption(event.url.clone())))?;

        info!(uri = %record.uri, "Adding data to metadata store");
        self.publisher
            .publish(&record)
            .await
            .map_err(|e| run.abort(PipelineErrorKind::Publish(e)))?;
        run.advance(PipelineState::Published);
        info!(uri = %record.uri, "Adding data to metadata store done successfully");

        run.advance(PipelineState::Done);
        Ok(ProcessingOutcome::Published(record))
    }
}

impl<B, A, P> BlobEventHandler for ImageProcessor<B, A, P>
where
    B: BlobSource + 'static,
    A: ImageAnalyzer + 'static,
    P: MetadataPublisher + 'static,
{
    async fn handle(&self, event: BlobCreatedEvent) -> Result<ProcessingOutcome, PipelineError> {
        self.process(&event).await
    }
}
