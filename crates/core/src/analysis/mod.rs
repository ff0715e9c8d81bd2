//! Vision analysis of uploaded images.
//!
//! The pipeline only needs a caption and tags; [`ImageAnalyzer`] is the seam
//! implemented by the HTTP client.

mod types;

pub use types::{Caption, ImageAnalysisResult, ImageDescription};

use crate::remote::ServiceError;

/// Produces a description of the image at a URL.
pub trait ImageAnalyzer: Send + Sync {
    /// Analyze the image reachable at `image_url`.
    fn analyze(
        &self,
        image_url: &str,
    ) -> impl std::future::Future<Output = Result<ImageAnalysisResult, ServiceError>> + Send;
}
