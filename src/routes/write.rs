use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::put,
};

use super::SharedState;
use crate::error::Result;
use crate::github::write_file;
use crate::models::{FileWriteRequest, WriteResponse};

pub fn routes(state: SharedState) -> Router {
    Router::new()
        .route("/write-file", put(write))
        .route("/write-file/", put(write))
        .with_state(state)
}

async fn write(
    State(state): State<SharedState>,
    request: std::result::Result<Json<FileWriteRequest>, JsonRejection>,
) -> Result<Json<WriteResponse>> {
    let Json(request) = request?;
    request.validate()?;

    let result = write_file(state.source.as_ref(), &request, &state.default_committer).await?;

    Ok(Json(WriteResponse {
        status: "success",
        result,
    }))
}
