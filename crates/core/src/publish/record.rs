//! Metadata record sent to the metadata store.

use serde::{Deserialize, Serialize};

use crate::analysis::ImageAnalysisResult;
use crate::trigger::BlobCreatedEvent;

/// Namespace of the images ontology; record URIs are this plus the blob's base name.
pub const ONTOLOGY_NAMESPACE: &str = "http://www.semanticweb.org/ImagesOntology#";

/// Metadata describing one uploaded image.
///
/// Serialized with PascalCase keys (`Uri`, `Description`, `Content`, `Tags`),
/// which is what the store's create endpoint binds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ImageMetadataRecord {
    /// Ontology individual URI.
    pub uri: String,
    /// Caption text.
    pub description: String,
    /// Source blob URL.
    pub content: String,
    /// Content tags.
    pub tags: Vec<String>,
}

impl ImageMetadataRecord {
    /// Builds the record for `event` from its analysis.
    ///
    /// Returns `None` when the analysis has no caption.
    #[must_use]
    pub fn from_analysis(event: &BlobCreatedEvent, analysis: &ImageAnalysisResult) -> Option<Self> {
        let caption = analysis.primary_caption()?;

        Some(Self {
            uri: format!("{ONTOLOGY_NAMESPACE}{}", event.base_name()),
            description: caption.text.clone(),
            content: event.url.clone(),
            tags: analysis.description.tags.clone(),
        })
    }
}
