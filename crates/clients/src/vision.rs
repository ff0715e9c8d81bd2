//! Vision analysis API client.

use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use imor_core::analysis::{ImageAnalysisResult, ImageAnalyzer};
use imor_core::remote::ServiceError;
use imor_shared::VisionConfig;

use crate::http::{join_url, read_json, send};

const SERVICE: &str = "vision";

/// Header carrying the API key.
pub const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

/// Path and query of the analyze operation.
const ANALYZE_PATH: &str = "/analyze?visualFeatures=Description&language=en";

#[derive(Serialize)]
struct AnalyzeRequest<'a> {
    url: &'a str,
}

/// Client for the vision `analyze` operation.
#[derive(Clone)]
pub struct VisionClient {
    http: Client,
    analyze_url: String,
    subscription_key: String,
}

impl VisionClient {
    /// Creates a client using a shared `reqwest` client.
    #[must_use]
    pub fn new(http: Client, config: &VisionConfig) -> Self {
        Self {
            http,
            analyze_url: join_url(&config.endpoint, ANALYZE_PATH),
            subscription_key: config.subscription_key.clone(),
        }
    }

    /// Full URL of the analyze operation.
    #[must_use]
    pub fn analyze_url(&self) -> &str {
        &self.analyze_url
    }
}

impl ImageAnalyzer for VisionClient {
    async fn analyze(&self, image_url: &str) -> Result<ImageAnalysisResult, ServiceError> {
        debug!(image_url, "Requesting image description");

        let request = self
            .http
            .post(&self.analyze_url)
            .header(SUBSCRIPTION_KEY_HEADER, &self.subscription_key)
            .json(&AnalyzeRequest { url: image_url });

        let response = send(SERVICE, request).await?;
        read_json(SERVICE, response).await
    }
}
