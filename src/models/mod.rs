//! Data transfer objects (DTOs) for upstream payloads and gateway responses.
//!
//! - `contents`: ContentItem, Contents, EntryType (upstream contents API)
//! - `tree`: TreeEntry, InlinedContent (scan results)
//! - `requests`: gateway query/body types and success envelopes

pub mod contents;
pub mod requests;
pub mod tree;

pub use contents::*;
pub use requests::*;
pub use tree::*;
