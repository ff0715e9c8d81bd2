//! SPARQL metadata store client.

use reqwest::Client;
use tracing::debug;

use imor_core::publish::{ImageMetadataRecord, MetadataPublisher};
use imor_core::remote::ServiceError;
use imor_shared::SparqlConfig;

use crate::http::{join_url, send};

const SERVICE: &str = "sparql";

/// Path of the image creation operation.
const CREATE_IMAGE_PATH: &str = "/images/create";

/// Client for the metadata store REST API.
#[derive(Clone)]
pub struct SparqlClient {
    http: Client,
    create_url: String,
}

impl SparqlClient {
    /// Creates a client using a shared `reqwest` client.
    #[must_use]
    pub fn new(http: Client, config: &SparqlConfig) -> Self {
        Self {
            http,
            create_url: join_url(&config.endpoint, CREATE_IMAGE_PATH),
        }
    }

    /// Full URL of the create operation.
    #[must_use]
    pub fn create_url(&self) -> &str {
        &self.create_url
    }
}

impl MetadataPublisher for SparqlClient {
    async fn publish(&self, record: &ImageMetadataRecord) -> Result<(), ServiceError> {
        debug!(uri = %record.uri, "Posting image metadata");

        send(SERVICE, self.http.post(&self.create_url).json(record)).await?;
        Ok(())
    }
}
