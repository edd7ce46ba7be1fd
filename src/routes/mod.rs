//! API route handlers - maps gateway endpoints to upstream operations.
//!
//! Each submodule defines routes for one operation:
//! - `list`: Directory listing (GET /list-files)
//! - `read`: Decoded file content (GET /read-file)
//! - `scan`: Recursive tree scan with inlined docs (POST /scan-repo)
//! - `write`: Create or update a file (PUT /write-file)
//! - `meta`: Health check, OpenAPI document and plugin manifest

pub mod list;
pub mod meta;
pub mod read;
pub mod scan;
pub mod write;

use std::sync::Arc;

use axum::Router;

use crate::github::SharedSource;
use crate::models::Committer;

pub struct AppState {
    pub source: SharedSource,
    pub default_committer: Committer,
}

pub type SharedState = Arc<AppState>;

pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .merge(meta::routes())
        .merge(list::routes(state.clone()))
        .merge(read::routes(state.clone()))
        .merge(scan::routes(state.clone()))
        .merge(write::routes(state))
}
