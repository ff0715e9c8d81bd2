//! Vision analysis result types.

use serde::{Deserialize, Serialize};

/// Response of the vision `analyze` operation with the `Description` feature.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageAnalysisResult {
    /// Request ID assigned by the vision service.
    #[serde(default)]
    pub request_id: String,
    /// Natural-language description.
    #[serde(default)]
    pub description: ImageDescription,
}

/// Captions and tags describing an image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageDescription {
    /// Captions, most confident first.
    #[serde(default)]
    pub captions: Vec<Caption>,
    /// Tags for the image content.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// One caption candidate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Caption {
    /// Caption text.
    pub text: String,
    /// Confidence in `[0, 1]`.
    #[serde(default)]
    pub confidence: f64,
}

impl ImageAnalysisResult {
    /// The caption used for the metadata record: the first one returned.
    #[must_use]
    pub fn primary_caption(&self) -> Option<&Caption> {
        self.description.captions.first()
    }
}
