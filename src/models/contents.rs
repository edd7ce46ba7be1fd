//! Upstream contents API payloads.
//!
//! `GET /repos/{owner}/{repo}/contents/{path}?ref={branch}` answers with a
//! single object for a file and an array for a directory. Fields the gateway
//! does not interpret are kept in `extra` so listings can be returned verbatim.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    File,
    Dir,
    Symlink,
    Submodule,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentItem {
    pub name: String,
    pub path: String,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ContentItem {
    #[cfg(test)]
    pub fn new(name: impl Into<String>, path: impl Into<String>, entry_type: EntryType) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            entry_type,
            sha: None,
            size: None,
            content: None,
            encoding: None,
            extra: Map::new(),
        }
    }
}

/// Either side of the contents API's file/directory split.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Contents {
    Directory(Vec<ContentItem>),
    File(ContentItem),
}
