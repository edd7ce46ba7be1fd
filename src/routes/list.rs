use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    routing::get,
};

use super::SharedState;
use crate::error::{AppError, Result};
use crate::models::{ListQuery, ListResponse};

pub fn routes(state: SharedState) -> Router {
    Router::new()
        .route("/list-files", get(list_files))
        .route("/list-files/", get(list_files))
        .with_state(state)
}

async fn list_files(
    State(state): State<SharedState>,
    query: std::result::Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<ListResponse>> {
    let Query(query) = query?;
    query.validate()?;

    let files = state
        .source
        .fetch_contents(&query.owner, &query.repo, &query.path, &query.branch)
        .await?
        .ok_or_else(|| AppError::NotFound(query.path.clone()))?;

    Ok(Json(ListResponse {
        status: "success",
        path: query.path,
        files,
    }))
}
