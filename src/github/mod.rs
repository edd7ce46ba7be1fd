//! Upstream source-control API access.
//!
//! - `client`: `ContentSource` trait and the reqwest-backed `GitHubClient`
//! - `reader`: fetch one file and decode it to text
//! - `scanner`: depth-bounded tree walk with selective content inlining
//! - `writer`: create-or-update a file using its current revision marker

pub mod client;
pub mod reader;
pub mod scanner;
pub mod writer;

#[cfg(test)]
pub mod fake;

pub use client::{ContentSource, GitHubClient, SharedSource};
pub use reader::read_file;
pub use scanner::scan;
pub use writer::write_file;

use crate::error::AppError;

/// The path resolved to something other than a single file.
pub(crate) fn not_a_file(path: &str) -> AppError {
    AppError::Upstream {
        status: 400,
        message: format!("{} is not a file", path),
    }
}
