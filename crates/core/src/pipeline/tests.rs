//! Pipeline tests with in-memory collaborators.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::*;
use crate::analysis::{Caption, ImageAnalysisResult, ImageAnalyzer, ImageDescription};
use crate::publish::{ImageMetadataRecord, MetadataPublisher};
use crate::remote::ServiceError;
use crate::storage::{BlobInput, BlobSource, StorageError};
use crate::trigger::BlobCreatedEvent;

const CAT_URL: &str = "https://x/container/cat.png";

/// Mock blob store keyed by URL.
#[derive(Default)]
struct MockBlobs {
    blobs: HashMap<String, u64>,
    fail: bool,
    opened: Mutex<Vec<String>>,
}

impl MockBlobs {
    fn with_blob(url: &str, length: u64) -> Self {
        Self {
            blobs: HashMap::from([(url.to_string(), length)]),
            ..Self::default()
        }
    }

    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

impl BlobSource for MockBlobs {
    async fn open(&self, url: &str) -> Result<Option<BlobInput>, StorageError> {
        self.opened.lock().unwrap().push(url.to_string());
        if self.fail {
            return Err(StorageError::operation("connection reset"));
        }
        Ok(self.blobs.get(url).map(|length| BlobInput {
            key: url.rsplit('/').next().unwrap_or_default().to_string(),
            content_length: *length,
        }))
    }
}

/// Mock analyzer answering with a fixed result or status code.
struct MockAnalyzer {
    response: Result<ImageAnalysisResult, u16>,
    calls: Mutex<Vec<String>>,
}

impl MockAnalyzer {
    fn returning(captions: &[&str], tags: &[&str]) -> Self {
        Self {
            response: Ok(ImageAnalysisResult {
                request_id: "req-42".to_string(),
                description: ImageDescription {
                    captions: captions
                        .iter()
                        .map(|text| Caption {
                            text: (*text).to_string(),
                            confidence: 0.75,
                        })
                        .collect(),
                    tags: tags.iter().map(|t| (*t).to_string()).collect(),
                },
            }),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn failing(status: u16) -> Self {
        Self {
            response: Err(status),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl ImageAnalyzer for MockAnalyzer {
    async fn analyze(&self, image_url: &str) -> Result<ImageAnalysisResult, ServiceError> {
        self.calls.lock().unwrap().push(image_url.to_string());
        self.response
            .clone()
            .map_err(|status| ServiceError::status("vision", status, "error"))
    }
}

/// Mock publisher recording every record it is given.
#[derive(Default)]
struct MockPublisher {
    fail_status: Option<u16>,
    published: Mutex<Vec<ImageMetadataRecord>>,
}

impl MockPublisher {
    fn failing(status: u16) -> Self {
        Self {
            fail_status: Some(status),
            ..Self::default()
        }
    }

    fn call_count(&self) -> usize {
        self.published.lock().unwrap().len()
    }
}

impl MetadataPublisher for MockPublisher {
    async fn publish(&self, record: &ImageMetadataRecord) -> Result<(), ServiceError> {
        self.published.lock().unwrap().push(record.clone());
        match self.fail_status {
            Some(status) => Err(ServiceError::status("sparql", status, "error")),
            None => Ok(()),
        }
    }
}

struct Harness {
    blobs: Arc<MockBlobs>,
    analyzer: Arc<MockAnalyzer>,
    publisher: Arc<MockPublisher>,
}

impl Harness {
    fn new(blobs: MockBlobs, analyzer: MockAnalyzer, publisher: MockPublisher) -> Self {
        Self {
            blobs: Arc::new(blobs),
            analyzer: Arc::new(analyzer),
            publisher: Arc::new(publisher),
        }
    }

    fn processor(&self) -> ImageProcessor<MockBlobs, MockAnalyzer, MockPublisher> {
        ImageProcessor::new(
            Arc::clone(&self.blobs),
            Arc::clone(&self.analyzer),
            Arc::clone(&self.publisher),
        )
    }
}

#[tokio::test]
async fn test_publishes_record_for_supported_image() {
    let harness = Harness::new(
        MockBlobs::with_blob(CAT_URL, 2048),
        MockAnalyzer::returning(&["a cat"], &["cat", "animal"]),
        MockPublisher::default(),
    );

    let outcome = harness
        .processor()
        .process(&BlobCreatedEvent::new(CAT_URL, 2048))
        .await
        .expect("pipeline should succeed");

    let expected = ImageMetadataRecord {
        uri: "http://www.semanticweb.org/ImagesOntology#cat".to_string(),
        description: "a cat".to_string(),
        content: CAT_URL.to_string(),
        tags: vec!["cat".to_string(), "animal".to_string()],
    };
    assert_eq!(outcome, ProcessingOutcome::Published(expected.clone()));
    assert_eq!(*harness.analyzer.calls.lock().unwrap(), vec![CAT_URL]);
    assert_eq!(*harness.publisher.published.lock().unwrap(), vec![expected]);
}

#[tokio::test]
#[tracing_test::traced_test]
async fn test_format_details_are_logged_before_analysis() {
    let url = "https://x/container/dog.JPG";
    let harness = Harness::new(
        MockBlobs::with_blob(url, 512),
        MockAnalyzer::returning(&["a dog"], &["dog"]),
        MockPublisher::default(),
    );

    harness
        .processor()
        .process(&BlobCreatedEvent::new(url, 512))
        .await
        .expect("pipeline should succeed");

    assert!(logs_contain("Analyzing uploaded image"));
    assert!(logs_contain("image/jpeg"));
}

#[tokio::test]
async fn test_unsupported_extension_is_skipped_without_remote_calls() {
    let url = "https://x/container/notes.txt";
    let harness = Harness::new(
        MockBlobs::with_blob(url, 10),
        MockAnalyzer::returning(&["text"], &[]),
        MockPublisher::default(),
    );

    let outcome = harness
        .processor()
        .process(&BlobCreatedEvent::new(url, 10))
        .await
        .expect("skip is not an error");

    assert_eq!(
        outcome,
        ProcessingOutcome::Skipped(SkipReason::UnsupportedFormat {
            extension: "txt".to_string()
        })
    );
    assert_eq!(harness.analyzer.call_count(), 0);
    assert_eq!(harness.publisher.call_count(), 0);
}

#[tokio::test]
async fn test_missing_extension_is_skipped() {
    let url = "https://x/container/README";
    let harness = Harness::new(
        MockBlobs::with_blob(url, 10),
        MockAnalyzer::returning(&["text"], &[]),
        MockPublisher::default(),
    );

    let outcome = harness
        .processor()
        .process(&BlobCreatedEvent::new(url, 10))
        .await
        .expect("skip is not an error");

    assert!(matches!(
        outcome,
        ProcessingOutcome::Skipped(SkipReason::UnsupportedFormat { ref extension }) if extension.is_empty()
    ));
    assert_eq!(harness.analyzer.call_count(), 0);
}

#[tokio::test]
async fn test_missing_input_aborts_without_remote_calls() {
    let harness = Harness::new(
        MockBlobs::default(),
        MockAnalyzer::returning(&["a cat"], &["cat"]),
        MockPublisher::default(),
    );

    let err = harness
        .processor()
        .process(&BlobCreatedEvent::new(CAT_URL, 2048))
        .await
        .unwrap_err();

    assert_eq!(err.state, PipelineState::Start);
    assert!(matches!(err.kind, PipelineErrorKind::MissingInput(ref url) if url == CAT_URL));
    assert_eq!(*harness.blobs.opened.lock().unwrap(), vec![CAT_URL]);
    assert_eq!(harness.analyzer.call_count(), 0);
    assert_eq!(harness.publisher.call_count(), 0);
}

#[tokio::test]
async fn test_blob_store_failure_aborts() {
    let harness = Harness::new(
        MockBlobs::failing(),
        MockAnalyzer::returning(&["a cat"], &["cat"]),
        MockPublisher::default(),
    );

    let err = harness
        .processor()
        .process(&BlobCreatedEvent::new(CAT_URL, 2048))
        .await
        .unwrap_err();

    assert_eq!(err.state, PipelineState::Start);
    assert!(matches!(err.kind, PipelineErrorKind::Storage(_)));
    assert_eq!(harness.analyzer.call_count(), 0);
}

#[tokio::test]
async fn test_analysis_failure_aborts_before_publish() {
    let harness = Harness::new(
        MockBlobs::with_blob(CAT_URL, 2048),
        MockAnalyzer::failing(401),
        MockPublisher::default(),
    );

    let err = harness
        .processor()
        .process(&BlobCreatedEvent::new(CAT_URL, 2048))
        .await
        .unwrap_err();

    assert_eq!(err.state, PipelineState::FormatChecked);
    assert!(matches!(
        err.kind,
        PipelineErrorKind::Analysis(ServiceError::Status { status: 401, .. })
    ));
    assert_eq!(harness.analyzer.call_count(), 1);
    assert_eq!(harness.publisher.call_count(), 0);
}

#[tokio::test]
async fn test_analysis_without_caption_aborts_before_publish() {
    let harness = Harness::new(
        MockBlobs::with_blob(CAT_URL, 2048),
        MockAnalyzer::returning(&[], &["cat"]),
        MockPublisher::default(),
    );

    let err = harness
        .processor()
        .process(&BlobCreatedEvent::new(CAT_URL, 2048))
        .await
        .unwrap_err();

    assert_eq!(err.state, PipelineState::Analyzed);
    assert!(matches!(err.kind, PipelineErrorKind::NoCaption(_)));
    assert_eq!(harness.publisher.call_count(), 0);
}

#[tokio::test]
async fn test_publish_failure_reports_failure_after_analysis() {
    let harness = Harness::new(
        MockBlobs::with_blob(CAT_URL, 2048),
        MockAnalyzer::returning(&["a cat"], &["cat", "animal"]),
        MockPublisher::failing(500),
    );

    let err = harness
        .processor()
        .process(&BlobCreatedEvent::new(CAT_URL, 2048))
        .await
        .unwrap_err();

    assert_eq!(err.state, PipelineState::Analyzed);
    assert!(matches!(
        err.kind,
        PipelineErrorKind::Publish(ServiceError::Status { status: 500, .. })
    ));
    assert_eq!(harness.analyzer.call_count(), 1);
    assert_eq!(harness.publisher.call_count(), 1);
}

#[tokio::test]
async fn test_handler_trait_delegates_to_process() {
    let harness = Harness::new(
        MockBlobs::with_blob("https://x/container/dog.JPG", 99),
        MockAnalyzer::returning(&["a dog"], &["dog"]),
        MockPublisher::default(),
    );

    let outcome = harness
        .processor()
        .handle(BlobCreatedEvent::new("https://x/container/dog.JPG", 99))
        .await
        .expect("pipeline should succeed");

    match outcome {
        ProcessingOutcome::Published(record) => {
            assert_eq!(record.uri, "http://www.semanticweb.org/ImagesOntology#dog");
        }
        ProcessingOutcome::Skipped(reason) => panic!("unexpected skip: {reason:?}"),
    }
}
