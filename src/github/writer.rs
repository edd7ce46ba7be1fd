//! Write coordinator: resolve the file's current revision marker, then
//! create or update it in one upstream call.
//!
//! The marker is fetched fresh on every write. If the file changes between
//! the lookup and the PUT the upstream rejects the write with a conflict,
//! which is surfaced as-is.

use serde_json::Value;

use super::ContentSource;
use super::reader::encode_content;
use crate::error::Result;
use crate::models::{Committer, FileWriteRequest, PutContentsBody};

pub async fn write_file(
    source: &dyn ContentSource,
    request: &FileWriteRequest,
    default_committer: &Committer,
) -> Result<Value> {
    let sha = source
        .file_sha(&request.owner, &request.repo, &request.path, &request.branch)
        .await?;

    tracing::info!(
        owner = %request.owner,
        repo = %request.repo,
        path = %request.path,
        branch = %request.branch,
        create = sha.is_none(),
        "writing file"
    );

    let body = PutContentsBody {
        message: request.message.clone(),
        content: encode_content(&request.content),
        branch: request.branch.clone(),
        sha,
        committer: request.committer(default_committer),
    };

    source
        .put_contents(&request.owner, &request.repo, &request.path, &body)
        .await
}
