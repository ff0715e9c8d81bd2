//! Blob store implementation using Apache OpenDAL.

use opendal::{ErrorKind, Operator, services};
use tracing::debug;
use url::Url;

use super::config::StorageProvider;
use super::error::StorageError;

/// Readable handle to an input blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobInput {
    /// Blob name within its container.
    pub key: String,
    /// Length of the blob content in bytes.
    pub content_length: u64,
}

/// Source of input blobs.
///
/// Implemented by [`BlobStore`]; tests substitute in-memory fakes.
pub trait BlobSource: Send + Sync {
    /// Open the blob at `url`, or `None` if no readable blob exists there.
    fn open(
        &self,
        url: &str,
    ) -> impl std::future::Future<Output = Result<Option<BlobInput>, StorageError>> + Send;
}

/// Container and blob name addressed by a blob URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobLocation {
    /// Container name.
    pub container: String,
    /// Blob name, percent-decoded; may contain `/`.
    pub name: String,
}

impl BlobLocation {
    /// Resolves a blob URL against the configured provider.
    ///
    /// For Azure providers the URL must share the scheme, host and port of
    /// the blob endpoint; the local filesystem accepts any origin.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL points at another origin or does not name
    /// a blob (see [`BlobLocation::from_url`]).
    pub fn resolve(url: &str, provider: &StorageProvider) -> Result<Self, StorageError> {
        if let Some(endpoint) = provider.endpoint_url()? {
            let parsed =
                Url::parse(url).map_err(|e| StorageError::invalid_url(url, e.to_string()))?;
            let same_origin = parsed.scheme() == endpoint.scheme()
                && parsed.host_str() == endpoint.host_str()
                && parsed.port_or_known_default() == endpoint.port_or_known_default();

            if !same_origin {
                return Err(StorageError::invalid_url(
                    url,
                    format!(
                        "not served by blob endpoint {}",
                        endpoint.origin().ascii_serialization()
                    ),
                ));
            }
        }

        Self::from_url(url, provider.path_prefix())
    }

    /// Splits a blob URL into container and blob name.
    ///
    /// `path_prefix` is removed from the URL path first (see
    /// [`StorageProvider::path_prefix`]). The URL origin is not checked.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed, lacks a container or name,
    /// or decodes to a name that leaves its container.
    pub fn from_url(url: &str, path_prefix: &str) -> Result<Self, StorageError> {
        let parsed = Url::parse(url).map_err(|e| StorageError::invalid_url(url, e.to_string()))?;
        let path = parsed.path();
        let path = path
            .strip_prefix(path_prefix)
            .filter(|rest| rest.starts_with('/'))
            .unwrap_or(path)
            .trim_start_matches('/');

        let (container, name) = path
            .split_once('/')
            .filter(|(container, name)| !container.is_empty() && !name.is_empty())
            .ok_or_else(|| StorageError::invalid_url(url, "expected /<container>/<blob>"))?;

        let decode = |segment: &str| {
            urlencoding::decode(segment)
                .map(std::borrow::Cow::into_owned)
                .map_err(|e| StorageError::invalid_url(url, e.to_string()))
        };
        let container = decode(container)?;
        let name = decode(name)?;

        if container.contains(['/', '\\']) || is_dot_segment(&container) {
            return Err(StorageError::invalid_url(url, "invalid container name"));
        }
        if name.starts_with('/') || name.split(['/', '\\']).any(is_dot_segment) {
            return Err(StorageError::invalid_url(url, "blob name escapes its container"));
        }

        Ok(Self { container, name })
    }
}

fn is_dot_segment(segment: &str) -> bool {
    segment == "." || segment == ".."
}

/// Blob store backed by an OpenDAL operator per container.
#[derive(Debug, Clone)]
pub struct BlobStore {
    provider: StorageProvider,
}

impl BlobStore {
    /// Create a blob store for a provider.
    #[must_use]
    pub fn new(provider: StorageProvider) -> Self {
        Self { provider }
    }

    /// Create a blob store from a storage connection string.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection string cannot be parsed.
    pub fn from_connection_string(value: &str) -> Result<Self, StorageError> {
        StorageProvider::from_connection_string(value).map(Self::new)
    }

    /// Get the provider configuration.
    #[must_use]
    pub fn provider(&self) -> &StorageProvider {
        &self.provider
    }

    /// Create OpenDAL operator scoped to one container.
    fn operator(&self, container: &str) -> Result<Operator, StorageError> {
        match &self.provider {
            StorageProvider::AzureBlob {
                account,
                access_key,
                endpoint,
            } => {
                let builder = services::Azblob::default()
                    .endpoint(endpoint)
                    .account_name(account)
                    .account_key(access_key)
                    .container(container);

                Ok(Operator::new(builder)?.finish())
            }
            StorageProvider::LocalFs { root } => {
                let root = root.join(container);
                let builder = services::Fs::default().root(
                    root.to_str()
                        .ok_or_else(|| StorageError::configuration("invalid path"))?,
                );

                Ok(Operator::new(builder)?.finish())
            }
        }
    }
}

impl BlobSource for BlobStore {
    async fn open(&self, url: &str) -> Result<Option<BlobInput>, StorageError> {
        let location = BlobLocation::resolve(url, &self.provider)?;
        let operator = self.operator(&location.container)?;

        match operator.stat(&location.name).await {
            Ok(meta) => Ok(Some(BlobInput {
                key: location.name,
                content_length: meta.content_length(),
            })),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(
                    provider = self.provider.name(),
                    container = %location.container,
                    blob = %location.name,
                    "Blob not found"
                );
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }
}
