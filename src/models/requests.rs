//! Gateway request payloads and success envelopes.
//!
//! - `ListQuery`, `ReadQuery`: query strings for the GET operations
//! - `ScanRequest`: body of POST /scan-repo
//! - `FileWriteRequest`: body of PUT /write-file
//! - `Committer`, `PutContentsBody`: upstream create-or-update payload

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Contents, TreeEntry};
use crate::error::{AppError, Result};

pub const DEFAULT_BRANCH: &str = "main";
pub const DEFAULT_SCAN_DEPTH: u32 = 5;

fn default_branch() -> String {
    DEFAULT_BRANCH.to_string()
}

fn default_depth() -> u32 {
    DEFAULT_SCAN_DEPTH
}

fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AppError::InvalidRequest(format!("{} must not be empty", field)));
    }
    Ok(())
}

/// Rejects blank owner/repo names and the dot segments `.` and `..`, which
/// would let the request URL resolve outside the contents endpoint.
pub fn check_identifier(field: &str, value: &str) -> Result<()> {
    require(field, value)?;
    if value.contains('/') || is_dot_segment(value) {
        return Err(AppError::InvalidRequest(format!("{} '{}' is not a valid name", field, value)));
    }
    Ok(())
}

/// Rejects repository paths containing `.` or `..` segments.
pub fn check_repo_path(path: &str) -> Result<()> {
    if path.split('/').any(is_dot_segment) {
        return Err(AppError::InvalidRequest(format!(
            "path '{}' must not contain '.' or '..' segments",
            path
        )));
    }
    Ok(())
}

fn is_dot_segment(segment: &str) -> bool {
    matches!(segment.trim(), "." | "..")
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListQuery {
    pub owner: String,
    pub repo: String,
    #[serde(default)]
    pub path: String,
    #[serde(default = "default_branch")]
    pub branch: String,
}

impl ListQuery {
    pub fn validate(&self) -> Result<()> {
        check_identifier("owner", &self.owner)?;
        check_identifier("repo", &self.repo)?;
        check_repo_path(&self.path)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReadQuery {
    pub owner: String,
    pub repo: String,
    pub path: String,
    #[serde(default = "default_branch")]
    pub branch: String,
}

impl ReadQuery {
    pub fn validate(&self) -> Result<()> {
        check_identifier("owner", &self.owner)?;
        check_identifier("repo", &self.repo)?;
        require("path", &self.path)?;
        check_repo_path(&self.path)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScanRequest {
    pub owner: String,
    pub repo: String,
    #[serde(default)]
    pub path: String,
    #[serde(default = "default_branch")]
    pub branch: String,
    #[serde(default = "default_depth", alias = "max_depth")]
    pub depth: u32,
}

impl ScanRequest {
    #[cfg(test)]
    pub fn new(owner: &str, repo: &str, path: &str, branch: &str, depth: u32) -> Self {
        Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
            path: path.to_string(),
            branch: branch.to_string(),
            depth,
        }
    }

    pub fn validate(&self) -> Result<()> {
        check_identifier("owner", &self.owner)?;
        check_identifier("repo", &self.repo)?;
        check_repo_path(&self.path)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthorInput {
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FileWriteRequest {
    pub owner: String,
    pub repo: String,
    pub branch: String,
    pub path: String,
    pub content: String,
    pub message: String,
    #[serde(default)]
    pub author: Option<AuthorInput>,
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default)]
    pub author_email: Option<String>,
}

impl FileWriteRequest {
    pub fn validate(&self) -> Result<()> {
        check_identifier("owner", &self.owner)?;
        check_identifier("repo", &self.repo)?;
        require("branch", &self.branch)?;
        require("path", &self.path)?;
        check_repo_path(&self.path)?;
        require("message", &self.message)
    }

    /// Resolves the committer, preferring the nested `author` object, then the
    /// flat `author_name`/`author_email` fields, then `fallback`.
    pub fn committer(&self, fallback: &Committer) -> Committer {
        let nested = self.author.clone().unwrap_or_default();
        let present = |v: &String| !v.trim().is_empty();
        let pick = |nested: Option<String>, flat: &Option<String>, default: &str| {
            nested
                .filter(present)
                .or_else(|| flat.clone().filter(present))
                .unwrap_or_else(|| default.to_string())
        };

        Committer {
            name: pick(nested.name, &self.author_name, &fallback.name),
            email: pick(nested.email, &self.author_email, &fallback.email),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Committer {
    pub name: String,
    pub email: String,
}

/// Body of `PUT /repos/{owner}/{repo}/contents/{path}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PutContentsBody {
    pub message: String,
    /// Base64-encoded file content.
    pub content: String,
    pub branch: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,
    pub committer: Committer,
}

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub status: &'static str,
    pub path: String,
    pub files: Contents,
}

#[derive(Debug, Serialize)]
pub struct ReadResponse {
    pub status: &'static str,
    pub path: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct ScanResponse {
    pub status: &'static str,
    pub tree: Vec<TreeEntry>,
}

#[derive(Debug, Serialize)]
pub struct WriteResponse {
    pub status: &'static str,
    pub result: Value,
}
