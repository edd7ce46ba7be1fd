//! Gateway configuration loaded once at startup.
//!
//! - `GITHUB_TOKEN` (required): access token attached to every upstream call
//! - `GITHUB_API_URL` (optional): upstream base URL
//! - `GATEWAY_COMMITTER_NAME` / `GATEWAY_COMMITTER_EMAIL` (optional): fallback
//!   committer identity for writes
//!
//! A `.env` file in the working directory is read first if present.

use crate::error::{AppError, Result};
use crate::models::Committer;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_COMMITTER_NAME: &str = "GPT Agent";
pub const DEFAULT_COMMITTER_EMAIL: &str = "gpt-agent@nomena.dev";

#[derive(Clone)]
pub struct GatewayConfig {
    pub token: String,
    pub api_base_url: String,
    pub default_committer: Committer,
}

// Keep the token out of logs.
impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("token", &"<redacted>")
            .field("api_base_url", &self.api_base_url)
            .field("default_committer", &self.default_committer)
            .finish()
    }
}

impl GatewayConfig {
    pub fn new(token: impl Into<String>, api_base_url: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            api_base_url: normalize_base_url(&api_base_url.into()),
            default_committer: Committer {
                name: DEFAULT_COMMITTER_NAME.to_string(),
                email: DEFAULT_COMMITTER_EMAIL.to_string(),
            },
        }
    }

    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup("GITHUB_TOKEN")
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| {
                AppError::Configuration("Missing GITHUB_TOKEN in environment".to_string())
            })?;

        let api_base_url = lookup("GITHUB_API_URL")
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let mut config = Self::new(token.trim(), api_base_url);

        if let Some(name) = lookup("GATEWAY_COMMITTER_NAME").filter(|n| !n.trim().is_empty()) {
            config.default_committer.name = name;
        }
        if let Some(email) = lookup("GATEWAY_COMMITTER_EMAIL").filter(|e| !e.trim().is_empty()) {
            config.default_committer.email = email;
        }

        Ok(config)
    }

    pub fn with_api_base_url(mut self, url: &str) -> Self {
        self.api_base_url = normalize_base_url(url);
        self
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
