//! Errors from remote HTTP services.

use thiserror::Error;

/// Failure of a call to the vision API or the metadata store.
///
/// All variants are treated alike by the pipeline; they differ only in what
/// gets logged.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Request could not be sent or the response could not be read.
    #[error("{service} request failed: {message}")]
    Transport {
        /// Service name.
        service: &'static str,
        /// Underlying error.
        message: String,
    },

    /// Service answered with a non-success status.
    #[error("{service} returned status {status}: {body}")]
    Status {
        /// Service name.
        service: &'static str,
        /// HTTP status code.
        status: u16,
        /// Response body, possibly empty.
        body: String,
    },

    /// Response body was not the expected JSON.
    #[error("{service} response could not be decoded: {message}")]
    Decode {
        /// Service name.
        service: &'static str,
        /// Underlying error.
        message: String,
    },
}

impl ServiceError {
    /// Create a transport error.
    #[must_use]
    pub fn transport(service: &'static str, message: impl Into<String>) -> Self {
        Self::Transport {
            service,
            message: message.into(),
        }
    }

    /// Create a status error.
    #[must_use]
    pub fn status(service: &'static str, status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            service,
            status,
            body: body.into(),
        }
    }

    /// Create a decode error.
    #[must_use]
    pub fn decode(service: &'static str, message: impl Into<String>) -> Self {
        Self::Decode {
            service,
            message: message.into(),
        }
    }

    /// Name of the service that failed.
    #[must_use]
    pub const fn service(&self) -> &'static str {
        match self {
            Self::Transport { service, .. }
            | Self::Status { service, .. }
            | Self::Decode { service, .. } => *service,
        }
    }
}
