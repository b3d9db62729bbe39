//! Error types for bundler-vidispine.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid connection config: {0}")]
    InvalidConfig(String),

    #[error("API returned bad data: {body}")]
    BadRequest { body: String },

    #[error("API returned permission denied: {body}")]
    Forbidden { body: String },

    #[error("API returned server error {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("API still unavailable ({status}) after {attempts} attempts: {body}")]
    TransientUnavailable { status: u16, attempts: u32, body: String },

    #[error("API returned unexpected status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("received no response body from server: {0}")]
    NoResponse(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("request failed: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("could not look up file {file_id} on {storage_id}: {source}")]
    LookupFailed {
        storage_id: String,
        file_id: String,
        #[source]
        source: Box<Error>,
    },

    #[error("could not decode file document: {0}")]
    DecodeFailed(#[from] quick_xml::DeError),

    #[error("could not get chunk at offset {offset}: {source}")]
    TransferFailed {
        offset: u64,
        #[source]
        source: Box<Error>,
    },

    #[error("file {file_id} reports size {size}, can't determine length")]
    InvalidSize { file_id: String, size: i64 },

    #[error("block size must be greater than 0")]
    InvalidBlockSize,

    #[error("server returned zero bytes for range starting at {offset}")]
    EmptyChunk { offset: u64 },

    #[error("server returned {actual} bytes, requested {expected}")]
    LengthMismatch { expected: u64, actual: u64 },
}

pub type Result<T> = std::result::Result<T, Error>;
