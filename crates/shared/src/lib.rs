//! Shared errors and configuration for Imor.
//!
//! This crate provides common types used across all other crates:
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;

pub use config::{AppConfig, HttpConfig, ServerConfig, SparqlConfig, StorageSettings, VisionConfig};
pub use error::{AppError, AppResult};
