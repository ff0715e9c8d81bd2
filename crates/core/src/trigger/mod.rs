//! Blob-created trigger input.

use serde::{Deserialize, Serialize};

/// Notification that a blob was created.
///
/// Deserializes from the `data` of a `Microsoft.Storage.BlobCreated` event;
/// fields other than `url` and `contentLength` are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlobCreatedEvent {
    /// Full URL of the new blob.
    pub url: String,
    /// Blob size in bytes as reported by the storage platform.
    #[serde(rename = "contentLength", default)]
    pub size: u64,
}

impl BlobCreatedEvent {
    /// Creates a new event.
    #[must_use]
    pub fn new(url: impl Into<String>, size: u64) -> Self {
        Self {
            url: url.into(),
            size,
        }
    }

    /// Last path segment of the URL, without query or fragment.
    #[must_use]
    pub fn file_name(&self) -> &str {
        file_name(&self.url)
    }

    /// Extension of the file name without the leading `.`, or `""` if none.
    #[must_use]
    pub fn extension(&self) -> &str {
        split_extension(self.file_name()).1
    }

    /// File name with its final extension stripped.
    #[must_use]
    pub fn base_name(&self) -> &str {
        split_extension(self.file_name()).0
    }
}

fn file_name(url: &str) -> &str {
    let end = url.find(['?', '#']).unwrap_or(url.len());
    let path = &url[..end];
    path.rsplit('/').next().unwrap_or(path)
}

/// Splits `name` at its last `.` into `(stem, extension)`.
fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) => (&name[..idx], &name[idx + 1..]),
        None => (name, ""),
    }
}
