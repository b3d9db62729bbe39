//! I/O operations: the HTTP client seam and everything built on it.

mod client;
mod copy;
mod lookup;
mod reader;
mod transport;

#[cfg(test)]
pub(crate) mod mock;

pub use client::{HttpClient, HttpRequest, HttpResponse};
pub use copy::buffered_copy;
pub use lookup::fetch_descriptor;
pub use reader::ChunkedReader;
pub use transport::{Transport, execute};

#[cfg(feature = "reqwest")]
pub use client::ReqwestClient;
