//! Scan result tree.
//!
//! - `TreeEntry`: one file or directory discovered by a scan; directories
//!   carry `children`, inlined files carry either `content` or `content_error`
//! - `InlinedContent`: outcome of reading an inlined file

use serde::Serialize;

use super::EntryType;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TreeEntry {
    pub name: String,
    pub path: String,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<TreeEntry>>,
    #[serde(flatten)]
    pub inlined: Option<InlinedContent>,
}

/// Serialized as either `"content": ...` or `"content_error": ...`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub enum InlinedContent {
    #[serde(rename = "content")]
    Content(String),
    #[serde(rename = "content_error")]
    Error(String),
}

impl From<std::result::Result<String, String>> for InlinedContent {
    fn from(result: std::result::Result<String, String>) -> Self {
        match result {
            Ok(text) => InlinedContent::Content(text),
            Err(message) => InlinedContent::Error(message),
        }
    }
}

impl TreeEntry {
    pub fn directory(name: String, path: String, children: Vec<TreeEntry>) -> Self {
        Self {
            name,
            path,
            entry_type: EntryType::Dir,
            children: Some(children),
            inlined: None,
        }
    }

    pub fn leaf(name: String, path: String, entry_type: EntryType) -> Self {
        Self {
            name,
            path,
            entry_type,
            children: None,
            inlined: None,
        }
    }

    #[cfg(test)]
    pub fn content(&self) -> Option<&str> {
        match &self.inlined {
            Some(InlinedContent::Content(text)) => Some(text),
            _ => None,
        }
    }

    #[cfg(test)]
    pub fn content_error(&self) -> Option<&str> {
        match &self.inlined {
            Some(InlinedContent::Error(message)) => Some(message),
            _ => None,
        }
    }
}
