use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    routing::get,
};

use super::SharedState;
use crate::error::Result;
use crate::github::read_file;
use crate::models::{ReadQuery, ReadResponse};

pub fn routes(state: SharedState) -> Router {
    Router::new()
        .route("/read-file", get(get_file_content))
        .route("/read-file/", get(get_file_content))
        .with_state(state)
}

async fn get_file_content(
    State(state): State<SharedState>,
    query: std::result::Result<Query<ReadQuery>, QueryRejection>,
) -> Result<Json<ReadResponse>> {
    let Query(query) = query?;
    query.validate()?;

    let content = read_file(
        state.source.as_ref(),
        &query.owner,
        &query.repo,
        &query.path,
        &query.branch,
    )
    .await?;

    Ok(Json(ReadResponse {
        status: "success",
        path: query.path,
        content,
    }))
}
