//! Image ingestion pipeline for Imor.
//!
//! This crate contains the pipeline logic with ZERO web framework or HTTP
//! client dependencies. Remote services are reached through traits that the
//! clients crate implements.
//!
//! # Modules
//!
//! - `trigger` - Blob-created events and blob URL helpers
//! - `format` - Supported image format classification
//! - `storage` - Blob store access (Azure Blob Storage, local filesystem)
//! - `analysis` - Vision analysis results and the analyzer seam
//! - `publish` - Metadata records and the publisher seam
//! - `remote` - Errors shared by remote service calls
//! - `pipeline` - Orchestration state machine

pub mod analysis;
pub mod format;
pub mod pipeline;
pub mod publish;
pub mod remote;
pub mod storage;
pub mod trigger;
