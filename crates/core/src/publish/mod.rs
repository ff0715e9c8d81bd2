//! Publishing image metadata to the metadata store.

mod record;

pub use record::{ImageMetadataRecord, ONTOLOGY_NAMESPACE};

use crate::remote::ServiceError;

/// Persists metadata records.
pub trait MetadataPublisher: Send + Sync {
    /// Store one record.
    fn publish(
        &self,
        record: &ImageMetadataRecord,
    ) -> impl std::future::Future<Output = Result<(), ServiceError>> + Send;
}
