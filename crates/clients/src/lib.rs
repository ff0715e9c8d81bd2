//! HTTP clients for the services the pipeline calls.
//!
//! This crate provides:
//! - [`VisionClient`] - image captioning and tagging
//! - [`SparqlClient`] - metadata record storage
//! - [`build_http_client`] - the shared `reqwest` client both use

mod http;
pub mod sparql;
pub mod vision;

pub use http::build_http_client;
pub use sparql::SparqlClient;
pub use vision::VisionClient;
