//! In-memory `ContentSource` for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{Value, json};

use super::ContentSource;
use super::reader::encode_content;
use crate::error::{AppError, Result};
use crate::models::{ContentItem, Contents, EntryType, PutContentsBody};

#[derive(Default)]
pub struct FakeSource {
    entries: Mutex<HashMap<String, Contents>>,
    failures: HashMap<String, (u16, String)>,
    put_failures: HashMap<String, (u16, String)>,
    fetched: Mutex<Vec<String>>,
    puts: Mutex<Vec<(String, PutContentsBody)>>,
}

pub fn file_item(path: &str) -> ContentItem {
    let name = path.rsplit('/').next().unwrap_or(path);
    ContentItem::new(name, path, EntryType::File)
}

pub fn dir_item(path: &str) -> ContentItem {
    let name = path.rsplit('/').next().unwrap_or(path);
    ContentItem::new(name, path, EntryType::Dir)
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dir(self, path: &str, items: Vec<ContentItem>) -> Self {
        self.insert(path, Contents::Directory(items));
        self
    }

    pub fn with_file(self, path: &str, text: &str) -> Self {
        self.insert(path, Contents::File(stored_file(path, text, "sha-0")));
        self
    }

    pub fn with_failure(mut self, path: &str, status: u16, message: &str) -> Self {
        self.failures
            .insert(path.to_string(), (status, message.to_string()));
        self
    }

    pub fn with_put_failure(mut self, path: &str, status: u16, message: &str) -> Self {
        self.put_failures
            .insert(path.to_string(), (status, message.to_string()));
        self
    }

    /// Paths requested through `fetch_contents`, in call order.
    pub fn fetched(&self) -> Vec<String> {
        self.fetched.lock().unwrap().clone()
    }

    pub fn puts(&self) -> Vec<(String, PutContentsBody)> {
        self.puts.lock().unwrap().clone()
    }

    fn insert(&self, path: &str, contents: Contents) {
        self.entries
            .lock()
            .unwrap()
            .insert(path.to_string(), contents);
    }
}

fn stored_file(path: &str, text: &str, sha: &str) -> ContentItem {
    let mut item = file_item(path);
    item.sha = Some(sha.to_string());
    item.content = Some(encode_content(text));
    item.encoding = Some("base64".to_string());
    item
}

#[async_trait]
impl ContentSource for FakeSource {
    async fn fetch_contents(
        &self,
        _owner: &str,
        _repo: &str,
        path: &str,
        _branch: &str,
    ) -> Result<Option<Contents>> {
        self.fetched.lock().unwrap().push(path.to_string());

        if let Some((status, message)) = self.failures.get(path) {
            return Err(AppError::Upstream {
                status: *status,
                message: message.clone(),
            });
        }

        Ok(self.entries.lock().unwrap().get(path).cloned())
    }

    async fn put_contents(
        &self,
        _owner: &str,
        _repo: &str,
        path: &str,
        body: &PutContentsBody,
    ) -> Result<Value> {
        self.puts
            .lock()
            .unwrap()
            .push((path.to_string(), body.clone()));

        if let Some((status, message)) = self.put_failures.get(path) {
            return Err(AppError::Upstream {
                status: *status,
                message: message.clone(),
            });
        }

        let revision = self.puts.lock().unwrap().len();
        let sha = format!("sha-{}", revision);
        let mut item = file_item(path);
        item.sha = Some(sha.clone());
        item.content = Some(body.content.clone());
        item.encoding = Some("base64".to_string());
        self.insert(path, Contents::File(item));

        Ok(json!({
            "content": {"path": path, "sha": sha},
            "commit": {"message": body.message},
        }))
    }
}
