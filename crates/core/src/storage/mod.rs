//! Blob store access using Apache OpenDAL.
//!
//! Opens the blob named by a blob-created event so the pipeline can confirm a
//! readable input exists. Supported backends:
//! - Azure Blob Storage (account connection string, including Azurite)
//! - Local filesystem (development only)
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │ blob URL ── BlobLocation { container, name }                     │
//! │                  │                                               │
//! │                  ▼                                               │
//! │ StorageProvider ── Operator (azblob / fs) ── op.stat(key)         │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod service;

pub use config::StorageProvider;
pub use error::StorageError;
pub use service::{BlobInput, BlobLocation, BlobSource, BlobStore};
