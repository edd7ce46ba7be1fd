//! Repository tree scanner.
//!
//! Walks a directory tree through the contents API, one listing per
//! directory, up to `ScanRequest::depth` levels below the starting path.
//! Listing order is preserved. Files selected by [`is_inlined`] get their
//! decoded text attached; a failed read is recorded on that entry as
//! `content_error` and the walk continues.
//!
//! Depth: the starting listing is depth 0. A directory found in a listing at
//! depth `d` is expanded only if `d + 1 <= max_depth`; otherwise it is emitted
//! with empty `children`.

use std::future::Future;
use std::pin::Pin;

use super::{ContentSource, read_file};
use crate::error::{AppError, Result};
use crate::models::{Contents, EntryType, InlinedContent, ScanRequest, TreeEntry};

/// Root-level documents whose content is always inlined.
const ROOT_DOCUMENTS: [&str; 2] = ["functional_spec.md", "codex_task_tracker.md"];

type ScanFuture<'a> = Pin<Box<dyn Future<Output = Result<Vec<TreeEntry>>> + Send + 'a>>;

pub async fn scan(source: &dyn ContentSource, request: &ScanRequest) -> Result<Vec<TreeEntry>> {
    scan_level(source, request, &request.path, 0).await
}

/// Whether a file's content is inlined into scan results.
///
/// True for `functional_spec.md` / `codex_task_tracker.md` at the repository
/// root, and for any `.md` file under a top-level `docs/` directory. Both
/// checks ignore case.
pub fn is_inlined(path: &str, name: &str) -> bool {
    let name = name.to_lowercase();
    let path = path.to_lowercase();

    let root_document = !path.contains('/') && ROOT_DOCUMENTS.contains(&name.as_str());
    let docs_markdown = path.starts_with("docs/") && name.ends_with(".md");

    root_document || docs_markdown
}

fn scan_level<'a>(
    source: &'a dyn ContentSource,
    request: &'a ScanRequest,
    path: &'a str,
    depth: u32,
) -> ScanFuture<'a> {
    Box::pin(async move {
        tracing::debug!(
            owner = %request.owner,
            repo = %request.repo,
            path,
            depth,
            "scanning directory"
        );

        let items = match source
            .fetch_contents(&request.owner, &request.repo, path, &request.branch)
            .await?
        {
            None => return Err(AppError::NotFound(path.to_string())),
            Some(Contents::Directory(items)) => items,
            Some(Contents::File(_)) => {
                // A file where a directory was expected yields an empty tree.
                tracing::debug!(path, "scan target is a file; returning empty tree");
                return Ok(Vec::new());
            }
        };

        let mut entries = Vec::with_capacity(items.len());
        for item in items {
            let entry = match item.entry_type {
                EntryType::Dir => {
                    let children = if depth < request.depth {
                        scan_level(source, request, &item.path, depth + 1).await?
                    } else {
                        Vec::new()
                    };
                    TreeEntry::directory(item.name, item.path, children)
                }
                EntryType::File => {
                    let inlined = if is_inlined(&item.path, &item.name) {
                        Some(inline_file(source, request, &item.path).await)
                    } else {
                        None
                    };
                    let mut entry = TreeEntry::leaf(item.name, item.path, EntryType::File);
                    entry.inlined = inlined;
                    entry
                }
                other => TreeEntry::leaf(item.name, item.path, other),
            };
            entries.push(entry);
        }

        Ok(entries)
    })
}

async fn inline_file(source: &dyn ContentSource, request: &ScanRequest, path: &str) -> InlinedContent {
    let result = read_file(source, &request.owner, &request.repo, path, &request.branch)
        .await
        .map_err(|e| {
            tracing::warn!(path, error = %e, "failed to inline file content");
            e.to_string()
        });
    result.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::fake::{FakeSource, dir_item, file_item};
    use crate::github::GitHubClient;
    use crate::config::GatewayConfig;
    use serde_json::json;
    use wiremock::matchers::{method, path as url_path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request(path: &str, depth: u32) -> ScanRequest {
        ScanRequest::new("acme", "widgets", path, "main", depth)
    }

    /// root: docs/{guide.md, nested/{deep.md, deeper/}}, src/{main.go}, README.md
    fn sample_repo() -> FakeSource {
        FakeSource::new()
            .with_dir("", vec![dir_item("docs"), dir_item("src"), file_item("README.md")])
            .with_dir("docs", vec![file_item("docs/guide.md"), dir_item("docs/nested")])
            .with_dir(
                "docs/nested",
                vec![file_item("docs/nested/deep.md"), dir_item("docs/nested/deeper")],
            )
            .with_dir("docs/nested/deeper", vec![file_item("docs/nested/deeper/x.txt")])
            .with_dir("src", vec![file_item("src/main.go")])
            .with_file("docs/guide.md", "# Guide\n")
            .with_file("docs/nested/deep.md", "deep")
            .with_file("README.md", "readme")
    }

    fn find<'a>(entries: &'a [TreeEntry], name: &str) -> &'a TreeEntry {
        entries
            .iter()
            .find(|e| e.name == name)
            .unwrap_or_else(|| panic!("no entry named {}", name))
    }

    #[test]
    fn inclusion_predicate_cases() {
        assert!(is_inlined("docs/sub/dir/readme.md", "readme.md"));
        assert!(is_inlined("Docs/readme.MD", "readme.MD"));
        assert!(is_inlined("functional_spec.md", "functional_spec.md"));
        assert!(is_inlined("CODEX_TASK_TRACKER.md", "CODEX_TASK_TRACKER.md"));
        assert!(!is_inlined("readme.md", "readme.md"));
        assert!(!is_inlined("sub/functional_spec.md", "functional_spec.md"));
        assert!(!is_inlined("docs/diagram.png", "diagram.png"));
        assert!(!is_inlined("src/docs/notes.md", "notes.md"));
        assert!(!is_inlined("docsx/notes.md", "notes.md"));
    }

    #[test]
    fn inclusion_predicate_is_stable() {
        for (path, name) in [("docs/a.md", "a.md"), ("a.md", "a.md")] {
            assert_eq!(is_inlined(path, name), is_inlined(path, name));
        }
    }

    #[tokio::test]
    async fn depth_zero_never_expands_directories() {
        let source = sample_repo();
        let tree = scan(&source, &request("", 0)).await.unwrap();

        for entry in tree.iter().filter(|e| e.entry_type == EntryType::Dir) {
            assert_eq!(entry.children.as_deref(), Some(&[][..]));
        }
        assert_eq!(source.fetched().iter().filter(|p| p.as_str() == "src").count(), 0);
    }

    #[tokio::test]
    async fn directory_at_max_depth_is_listed_but_not_expanded() {
        let source = sample_repo();
        let tree = scan(&source, &request("", 1)).await.unwrap();

        let docs = find(&tree, "docs");
        let nested = find(docs.children.as_ref().unwrap(), "nested");
        assert_eq!(nested.entry_type, EntryType::Dir);
        assert_eq!(nested.children.as_deref(), Some(&[][..]));
        assert!(!source.fetched().contains(&"docs/nested".to_string()));
    }

    #[tokio::test]
    async fn preserves_listing_order_and_shapes_entries() {
        let source = sample_repo();
        let tree = scan(&source, &request("", 5)).await.unwrap();

        let names: Vec<_> = tree.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["docs", "src", "README.md"]);

        let readme = find(&tree, "README.md");
        assert!(readme.children.is_none());
        assert!(readme.inlined.is_none());

        let docs = find(&tree, "docs");
        let guide = find(docs.children.as_ref().unwrap(), "guide.md");
        assert_eq!(guide.content(), Some("# Guide\n"));

        let nested = find(docs.children.as_ref().unwrap(), "nested");
        let deep = find(nested.children.as_ref().unwrap(), "deep.md");
        assert_eq!(deep.content(), Some("deep"));

        let deeper = find(nested.children.as_ref().unwrap(), "deeper");
        let x = find(deeper.children.as_ref().unwrap(), "x.txt");
        assert!(x.inlined.is_none());

        let src = find(&tree, "src");
        assert_eq!(src.children.as_ref().unwrap()[0].path, "src/main.go");
    }

    #[tokio::test]
    async fn failed_content_read_is_recorded_not_fatal() {
        let source = sample_repo().with_failure("docs/guide.md", 500, "upstream exploded");
        let tree = scan(&source, &request("", 5)).await.unwrap();

        let docs = find(&tree, "docs");
        let children = docs.children.as_ref().unwrap();
        let guide = find(children, "guide.md");
        assert!(guide.content().is_none());
        assert!(guide.content_error().unwrap().contains("upstream exploded"));

        let nested = find(children, "nested");
        let deep = find(nested.children.as_ref().unwrap(), "deep.md");
        assert_eq!(deep.content(), Some("deep"));
        assert_eq!(find(&tree, "src").children.as_ref().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn missing_inlined_file_records_not_found() {
        let source = FakeSource::new().with_dir("", vec![file_item("functional_spec.md")]);
        let tree = scan(&source, &request("", 1)).await.unwrap();
        assert!(tree[0].content_error().unwrap().contains("functional_spec.md"));
    }

    #[tokio::test]
    async fn missing_start_path_is_not_found() {
        let source = sample_repo();
        let err = scan(&source, &request("nope", 3)).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref p) if p == "nope"));
    }

    #[tokio::test]
    async fn nested_listing_failure_aborts_scan() {
        let source = sample_repo().with_failure("src", 502, "bad gateway");
        let err = scan(&source, &request("", 3)).await.unwrap_err();
        assert!(matches!(err, AppError::Upstream { status: 502, .. }));
    }

    // A file path where a directory is expected is silently treated as empty.
    #[tokio::test]
    async fn file_start_path_returns_empty_tree() {
        let source = sample_repo();
        let tree = scan(&source, &request("README.md", 3)).await.unwrap();
        assert!(tree.is_empty());
    }

    #[tokio::test]
    async fn starts_below_root() {
        let source = sample_repo();
        let tree = scan(&source, &request("docs", 0)).await.unwrap();

        let names: Vec<_> = tree.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(names, vec!["docs/guide.md", "docs/nested"]);
        assert_eq!(tree[0].content(), Some("# Guide\n"));
        assert_eq!(tree[1].children.as_deref(), Some(&[][..]));
    }

    #[tokio::test]
    async fn scans_against_http_upstream() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(url_path("/repos/acme/widgets/contents"))
            .and(query_param("ref", "main"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"name": "docs", "path": "docs", "type": "dir"},
                {"name": "src", "path": "src", "type": "dir"},
                {"name": "README.md", "path": "README.md", "type": "file"}
            ])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(url_path("/repos/acme/widgets/contents/docs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"name": "guide.md", "path": "docs/guide.md", "type": "file"}
            ])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(url_path("/repos/acme/widgets/contents/docs/guide.md"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "guide.md", "path": "docs/guide.md", "type": "file",
                "content": "SGVsbG8sIGd1aWRlIQ==\n", "encoding": "base64"
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(url_path("/repos/acme/widgets/contents/src"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"name": "main.go", "path": "src/main.go", "type": "file"}
            ])))
            .mount(&server)
            .await;

        let client = GitHubClient::new(&GatewayConfig::new("t", server.uri())).unwrap();
        let tree = scan(&client, &request("", 1)).await.unwrap();

        let value = serde_json::to_value(&tree).unwrap();
        assert_eq!(
            value,
            json!([
                {"name": "docs", "path": "docs", "type": "dir", "children": [
                    {"name": "guide.md", "path": "docs/guide.md", "type": "file", "content": "Hello, guide!"}
                ]},
                {"name": "src", "path": "src", "type": "dir", "children": [
                    {"name": "main.go", "path": "src/main.go", "type": "file"}
                ]},
                {"name": "README.md", "path": "README.md", "type": "file"}
            ])
        );
    }
}
