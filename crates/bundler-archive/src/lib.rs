//! Streamed ZIP bundles with cleanup of partial output.
//!
//! # Architecture
//!
//! - `bundle.rs` - Output file ownership, entry writing, commit-or-delete
//! - `names.rs` - Entry name disambiguation

pub use bundle::Bundle;
pub use error::{Error, Result};
pub use names::EntryNames;

mod bundle;
mod error;
mod names;
