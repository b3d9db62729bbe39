use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid content list location '{location}': {reason}")]
    InvalidLocation { location: String, reason: String },

    #[error("could not read content list {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("could not download content list: {0}")]
    Fetch(#[from] bundler_vidispine::Error),

    #[error("could not understand content list: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
