//! Immutable data types for talking to Vidispine.
//!
//! Configuration, request descriptions and decoded records live here. Nothing
//! in this module performs I/O.

pub mod config;
pub mod document;
pub mod request;
pub mod retry;

pub use config::{Auth, ConnectionConfig};
pub use document::{FileDocument, MetadataField, SizedFile};
pub use request::{ApiRequest, Method};
pub use retry::{Backoff, RetryPolicy};
