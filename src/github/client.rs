//! Remote content client.
//!
//! `ContentSource` is the seam every gateway operation goes through; the
//! production implementation is `GitHubClient`, which talks to the contents
//! API with one authenticated request per call.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Response, StatusCode};
use serde_json::Value;

use crate::config::GatewayConfig;
use crate::error::{AppError, Result};
use crate::models::{Contents, PutContentsBody, check_identifier, check_repo_path};

const ACCEPT_JSON: &str = "application/vnd.github+json";
const USER_AGENT: &str = "repo-gateway";

#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Fetches the listing or file object at `path` on `branch`.
    /// `Ok(None)` means the upstream reported the path as not found.
    async fn fetch_contents(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        branch: &str,
    ) -> Result<Option<Contents>>;

    /// Creates or updates the file at `path`, returning the upstream result verbatim.
    async fn put_contents(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        body: &PutContentsBody,
    ) -> Result<Value>;

    /// Current revision marker of the file at `path`, or `None` if it does not exist.
    async fn file_sha(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        branch: &str,
    ) -> Result<Option<String>> {
        match self.fetch_contents(owner, repo, path, branch).await? {
            None => Ok(None),
            Some(Contents::File(item)) => Ok(item.sha),
            Some(Contents::Directory(_)) => Err(super::not_a_file(path)),
        }
    }
}

pub type SharedSource = Arc<dyn ContentSource>;

pub struct GitHubClient {
    http: reqwest::Client,
    api_base_url: String,
}

impl GitHubClient {
    pub fn new(config: &GatewayConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.token))
            .map_err(|_| AppError::Configuration("GITHUB_TOKEN is not a valid header value".to_string()))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_JSON));

        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            api_base_url: config.api_base_url.clone(),
        })
    }

    fn contents_url(&self, owner: &str, repo: &str, path: &str) -> Result<String> {
        check_identifier("owner", owner)?;
        check_identifier("repo", repo)?;
        check_repo_path(path)?;

        let base = format!(
            "{}/repos/{}/{}/contents",
            self.api_base_url,
            urlencoding::encode(owner),
            urlencoding::encode(repo),
        );
        let encoded = encode_path(path);
        if encoded.is_empty() {
            Ok(base)
        } else {
            Ok(format!("{}/{}", base, encoded))
        }
    }
}

#[async_trait]
impl ContentSource for GitHubClient {
    async fn fetch_contents(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        branch: &str,
    ) -> Result<Option<Contents>> {
        let url = self.contents_url(owner, repo, path)?;
        let response = self.http.get(&url).query(&[("ref", branch)]).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            tracing::debug!(owner, repo, path, branch, "upstream path not found");
            return Ok(None);
        }

        if !response.status().is_success() {
            return Err(upstream_error(response, &format!("Failed to read path '{}'", path)).await);
        }

        Ok(Some(response.json::<Contents>().await?))
    }

    async fn put_contents(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        body: &PutContentsBody,
    ) -> Result<Value> {
        let url = self.contents_url(owner, repo, path)?;
        let response = self.http.put(&url).json(body).send().await?;

        if !matches!(response.status(), StatusCode::OK | StatusCode::CREATED) {
            return Err(upstream_error(response, "Failed to write file").await);
        }

        Ok(response.json::<Value>().await?)
    }
}

/// Percent-encodes each segment of a repository path, keeping `/` separators.
pub fn encode_path(path: &str) -> String {
    path.trim_matches('/')
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

async fn upstream_error(response: Response, context: &str) -> AppError {
    let status = response.status();
    let detail = response
        .json::<Value>()
        .await
        .ok()
        .and_then(|body| body.get("message").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown error").to_string());

    tracing::warn!(status = status.as_u16(), %detail, "{}", context);

    AppError::Upstream {
        status: status.as_u16(),
        message: format!("{}: {}", context, detail),
    }
}
