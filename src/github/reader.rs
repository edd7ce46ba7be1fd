//! File content reader: fetch a single file and decode its base64 payload.

use base64::Engine;

use super::ContentSource;
use crate::error::{AppError, Result};
use crate::models::{ContentItem, Contents};

pub async fn read_file(
    source: &dyn ContentSource,
    owner: &str,
    repo: &str,
    path: &str,
    branch: &str,
) -> Result<String> {
    match source.fetch_contents(owner, repo, path, branch).await? {
        None => Err(AppError::NotFound(path.to_string())),
        Some(Contents::File(item)) => decode_content(&item),
        Some(Contents::Directory(_)) => Err(super::not_a_file(path)),
    }
}

pub fn decode_content(item: &ContentItem) -> Result<String> {
    let encoding = item.encoding.as_deref().unwrap_or("");
    if encoding != "base64" {
        return Err(AppError::UnexpectedEncoding(format!(
            "{} uses encoding '{}', expected 'base64'",
            item.path, encoding
        )));
    }

    // The upstream wraps base64 at 60 columns
    let cleaned: String = item
        .content
        .as_deref()
        .unwrap_or("")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(cleaned)
        .map_err(|e| AppError::UnexpectedEncoding(format!("{}: invalid base64: {}", item.path, e)))?;

    String::from_utf8(bytes)
        .map_err(|e| AppError::UnexpectedEncoding(format!("{}: not valid UTF-8: {}", item.path, e)))
}

pub fn encode_content(text: &str) -> String {
    base64::engine::general_purpose::STANDARD.encode(text.as_bytes())
}
