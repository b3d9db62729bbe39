use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("could not create bundle '{path}': {source}")]
    Create { path: PathBuf, source: io::Error },

    #[error("could not start entry '{name}': {source}")]
    StartEntry {
        name: String,
        source: zip::result::ZipError,
    },

    #[error("could not write entry '{name}': {source}")]
    WriteEntry { name: String, source: io::Error },

    #[error("entry '{name}' declared {declared} bytes but {written} were written")]
    SizeMismatch {
        name: String,
        declared: u64,
        written: u64,
    },

    #[error("could not finish bundle: {0}")]
    Finish(#[source] zip::result::ZipError),

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
