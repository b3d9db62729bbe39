//! Pure transformations for talking to Vidispine.
//!
//! Nothing here performs I/O: URL assembly, response classification, range
//! arithmetic and backoff computation.

mod range;
mod retry;
mod status;
mod url;

pub use range::{next_block_len, range_header};
pub use retry::retry_delay;
pub use status::{Outcome, classify};
pub use url::{build_url, encode_component, url_host};
