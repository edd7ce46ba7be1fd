use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::post,
};

use super::SharedState;
use crate::error::Result;
use crate::github::scan;
use crate::models::{ScanRequest, ScanResponse};

pub fn routes(state: SharedState) -> Router {
    Router::new()
        .route("/scan-repo", post(scan_repo))
        .route("/scan-repo/", post(scan_repo))
        .with_state(state)
}

async fn scan_repo(
    State(state): State<SharedState>,
    request: std::result::Result<Json<ScanRequest>, JsonRejection>,
) -> Result<Json<ScanResponse>> {
    let Json(request) = request?;
    request.validate()?;

    let tree = scan(state.source.as_ref(), &request).await?;
    tracing::debug!(entries = tree.len(), path = %request.path, "scan complete");

    Ok(Json(ScanResponse {
        status: "success",
        tree,
    }))
}
