//! Storage provider configuration.

use std::path::PathBuf;

use url::Url;

use super::error::StorageError;

/// Azurite account name.
const DEV_ACCOUNT_NAME: &str = "devstoreaccount1";
/// Azurite well-known account key.
const DEV_ACCOUNT_KEY: &str =
    "Eby8vdM02xNOcqFlqUwJPLlmEtlCDXJ1OUzFT50uSRZ6IFsuFq2UVErCz4I6tq/K1SZFPTOtr/KBHBeksoGMGw==";
/// Azurite blob endpoint.
const DEV_BLOB_ENDPOINT: &str = "http://127.0.0.1:10000/devstoreaccount1";

/// Where blobs are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageProvider {
    /// Azure Blob Storage account.
    AzureBlob {
        /// Storage account name.
        account: String,
        /// Storage account key.
        access_key: String,
        /// Blob service endpoint, e.g. `https://account.blob.core.windows.net`.
        endpoint: String,
    },
    /// Local filesystem (development only); containers are subdirectories.
    LocalFs {
        /// Root directory path.
        root: PathBuf,
    },
}

impl StorageProvider {
    /// Create Azure Blob Storage provider.
    #[must_use]
    pub fn azure_blob(
        account: impl Into<String>,
        access_key: impl Into<String>,
        endpoint: impl Into<String>,
    ) -> Self {
        Self::AzureBlob {
            account: account.into(),
            access_key: access_key.into(),
            endpoint: endpoint.into(),
        }
    }

    /// Create local filesystem provider (development only).
    #[must_use]
    pub fn local_fs(root: impl Into<PathBuf>) -> Self {
        Self::LocalFs { root: root.into() }
    }

    /// Parses a storage connection string.
    ///
    /// Accepts Azure account connection strings
    /// (`DefaultEndpointsProtocol=https;AccountName=…;AccountKey=…;EndpointSuffix=…`,
    /// optionally with `BlobEndpoint=…`), `UseDevelopmentStorage=true`, and
    /// `file://<root>` for a local directory.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the account name or key is missing.
    pub fn from_connection_string(value: &str) -> Result<Self, StorageError> {
        let value = value.trim();

        if let Some(root) = value.strip_prefix("file://") {
            if root.is_empty() {
                return Err(StorageError::configuration("file:// root is empty"));
            }
            return Ok(Self::local_fs(root));
        }

        let mut protocol = "https";
        let mut suffix = "core.windows.net";
        let mut account = None;
        let mut key = None;
        let mut blob_endpoint = None;

        for part in value.split(';').map(str::trim).filter(|p| !p.is_empty()) {
            let Some((name, setting)) = part.split_once('=') else {
                return Err(StorageError::configuration(format!(
                    "malformed connection string segment '{part}'"
                )));
            };

            match name.to_ascii_lowercase().as_str() {
                "usedevelopmentstorage" if setting.eq_ignore_ascii_case("true") => {
                    return Ok(Self::azure_blob(
                        DEV_ACCOUNT_NAME,
                        DEV_ACCOUNT_KEY,
                        DEV_BLOB_ENDPOINT,
                    ));
                }
                "defaultendpointsprotocol" => protocol = setting,
                "endpointsuffix" => suffix = setting,
                "accountname" => account = Some(setting),
                "accountkey" => key = Some(setting),
                "blobendpoint" => blob_endpoint = Some(setting.trim_end_matches('/')),
                _ => {}
            }
        }

        let account =
            account.ok_or_else(|| StorageError::configuration("connection string has no AccountName"))?;
        let key =
            key.ok_or_else(|| StorageError::configuration("connection string has no AccountKey"))?;
        let endpoint = blob_endpoint.map_or_else(
            || format!("{protocol}://{account}.blob.{suffix}"),
            ToString::to_string,
        );

        Ok(Self::azure_blob(account, key, endpoint))
    }

    /// Get the provider name for logging.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::AzureBlob { .. } => "azure_blob",
            Self::LocalFs { .. } => "local",
        }
    }

    /// Blob service endpoint that event URLs must point at.
    ///
    /// `None` for the local filesystem, which accepts any origin.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the endpoint is not a valid URL.
    pub fn endpoint_url(&self) -> Result<Option<Url>, StorageError> {
        match self {
            Self::AzureBlob { endpoint, .. } => Url::parse(endpoint).map(Some).map_err(|e| {
                StorageError::configuration(format!("invalid blob endpoint '{endpoint}': {e}"))
            }),
            Self::LocalFs { .. } => Ok(None),
        }
    }

    /// Path that precedes the container in blob URLs.
    ///
    /// Empty for account-per-host endpoints; `/devstoreaccount1` for Azurite.
    #[must_use]
    pub fn path_prefix(&self) -> &str {
        match self {
            Self::AzureBlob { endpoint, .. } => endpoint
                .find("://")
                .map(|idx| &endpoint[idx + 3..])
                .and_then(|rest| rest.find('/').map(|slash| &rest[slash..]))
                .map_or("", |path| path.trim_end_matches('/')),
            Self::LocalFs { .. } => "",
        }
    }
}
