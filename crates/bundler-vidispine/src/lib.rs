//! Chunked ranged reads of Vidispine storage files.
//!
//! # Architecture
//!
//! This crate follows the three-layer pattern:
//! - [`data`] - Immutable configuration and records
//! - [`core`] - Pure transformations (URLs, status classification, ranges, backoff)
//! - [`effects`] - I/O operations behind the [`HttpClient`] trait
//!
//! # Key Features
//!
//! - **Bounded Memory**: files are pulled one block at a time with `Range: Bytes=` requests
//! - **Transient Retry**: 502/503 responses are retried under an injectable [`RetryPolicy`]
//! - **Fail Fast**: descriptors with an unknown size never reach the reader

pub mod core;
pub mod data;
pub mod effects;
mod error;

pub use core::{Outcome, build_url, classify, retry_delay};
pub use data::{
    ApiRequest, Auth, Backoff, ConnectionConfig, FileDocument, MetadataField, Method, RetryPolicy,
    SizedFile,
};
pub use effects::{
    ChunkedReader, HttpClient, HttpRequest, HttpResponse, Transport, buffered_copy, execute,
    fetch_descriptor,
};

#[cfg(feature = "reqwest")]
pub use effects::ReqwestClient;

pub use error::{Error, Result};
