//! The list of files a bundle should contain.
//!
//! A content list is a JSON array of `{"fileId": ..., "storageId": ...}`
//! records, read from a local file or fetched over HTTP with an
//! `X-Authentication-Token` header.

mod error;
mod load;

pub use error::{Error, Result};
pub use load::{ContentItem, Location, download, load, load_file, parse};
