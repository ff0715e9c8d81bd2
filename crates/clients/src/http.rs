//! Shared HTTP plumbing for the outbound clients.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::info;

use imor_core::remote::ServiceError;
use imor_shared::HttpConfig;

/// Builds the `reqwest` client shared by every outbound call.
///
/// # Errors
///
/// Returns an error if the TLS backend cannot be initialized.
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .user_agent(concat!("imor/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// Joins a configured base URL and a path, dropping one trailing `/` from the base.
pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!("{}{path}", base.strip_suffix('/').unwrap_or(base))
}

/// Sends a request and fails on any non-success status.
pub(crate) async fn send(
    service: &'static str,
    request: RequestBuilder,
) -> Result<Response, ServiceError> {
    let response = request
        .send()
        .await
        .map_err(|e| ServiceError::transport(service, e.to_string()))?;

    let status = response.status();
    info!(service, status = %status, url = %response.url(), "Response received");

    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(ServiceError::status(service, status.as_u16(), body))
}

/// Reads the whole body and decodes it as JSON.
pub(crate) async fn read_json<T: DeserializeOwned>(
    service: &'static str,
    response: Response,
) -> Result<T, ServiceError> {
    let body = response
        .bytes()
        .await
        .map_err(|e| ServiceError::transport(service, e.to_string()))?;

    serde_json::from_slice(&body).map_err(|e| ServiceError::decode(service, e.to_string()))
}
