//! Designator resolution.
//!
//! A designator is whatever the user typed for the style or topic: a Google
//! Docs/Drive link, a local path, or the text itself.

use crate::extract::read_local_file;
use crate::store::LazyStore;
use docgen_core::{AppError, AppResult};
use std::path::PathBuf;
use std::sync::Arc;

const HOSTED_MARKERS: [&str; 2] = ["docs.google.com", "drive.google.com"];
const DOCUMENT_MARKER: &str = "docs.google.com/document";
const LOCATION_PREFIXES: [&str; 5] = ["/", "~", "./", "../", "http"];

/// Whether `designator` points at Google Docs or Drive.
pub fn is_hosted(designator: &str) -> bool {
    HOSTED_MARKERS.iter().any(|m| designator.contains(m))
}

/// Whether `designator` is shaped like a path or URL rather than prose.
pub fn looks_like_location(designator: &str) -> bool {
    let trimmed = designator.trim();
    LOCATION_PREFIXES.iter().any(|p| trimmed.starts_with(p))
}

/// Expand a leading `~` to the home directory.
pub fn expand_home(designator: &str) -> PathBuf {
    if designator == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    if let Some(rest) = designator.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(designator)
}

/// Turns designators into text.
pub struct SourceReader {
    store: Arc<LazyStore>,
    base_dir: Option<PathBuf>,
}

impl SourceReader {
    pub fn new(store: Arc<LazyStore>) -> Self {
        Self {
            store,
            base_dir: None,
        }
    }

    /// Resolve relative paths against `dir` instead of the process cwd.
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    /// Local path a designator names, with `~` expanded and relative paths
    /// joined onto the base directory.
    pub fn locate(&self, designator: &str) -> PathBuf {
        let path = expand_home(designator.trim());
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path,
        }
    }

    /// Text for `designator`, or empty if it could not be read.
    pub async fn resolve(&self, designator: &str) -> String {
        match self.try_resolve(designator).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("Could not read {}: {}", designator.trim(), e);
                String::new()
            }
        }
    }

    /// Text for `designator` with the reason for any failure.
    ///
    /// Links go to hosted storage, existing paths are read from disk,
    /// missing paths are an error, and anything else is literal text.
    pub async fn try_resolve(&self, designator: &str) -> AppResult<String> {
        let trimmed = designator.trim();

        if is_hosted(trimmed) {
            let store = self.store.get().await.ok_or_else(|| {
                AppError::Storage(
                    "Google Drive integration not available. Set up credentials.json first."
                        .to_string(),
                )
            })?;
            return if trimmed.contains(DOCUMENT_MARKER) {
                store.read_document(trimmed).await
            } else {
                store.read_file(trimmed).await
            };
        }

        let path = self.locate(trimmed);
        if !trimmed.is_empty() && path.is_file() {
            return read_local_file(&path);
        }

        if looks_like_location(trimmed) {
            return Err(AppError::Input(format!(
                "File not found: {}",
                path.display()
            )));
        }

        Ok(designator.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::DocumentStore;
    use std::sync::Mutex;
    use tempfile::TempDir;

    #[derive(Default)]
    struct RecordingStore {
        calls: Mutex<Vec<String>>,
    }

    #[async_trait::async_trait]
    impl DocumentStore for RecordingStore {
        async fn read_document(&self, url: &str) -> AppResult<String> {
            self.calls.lock().unwrap().push(format!("doc {}", url));
            Ok("document text".into())
        }
        async fn read_file(&self, url: &str) -> AppResult<String> {
            self.calls.lock().unwrap().push(format!("file {}", url));
            Ok("file text".into())
        }
        async fn create_document(
            &self,
            _title: &str,
            _content: &str,
            _folder_id: Option<&str>,
        ) -> AppResult<String> {
            unreachable!()
        }
        async fn upload_to_folder(
            &self,
            _folder_url: &str,
            _filename: &str,
            _content: &str,
        ) -> AppResult<String> {
            unreachable!()
        }
    }

    fn offline_reader() -> SourceReader {
        SourceReader::new(Arc::new(LazyStore::disabled()))
    }

    #[test]
    fn test_predicates() {
        assert!(is_hosted("https://docs.google.com/document/d/x/edit"));
        assert!(is_hosted("https://drive.google.com/drive/folders/y"));
        assert!(!is_hosted("https://example.com/post"));

        assert!(looks_like_location("/etc/style.md"));
        assert!(looks_like_location("~/notes.txt"));
        assert!(looks_like_location("./a.md"));
        assert!(looks_like_location("../a.md"));
        assert!(looks_like_location("https://example.com"));
        assert!(!looks_like_location("Write about Rust adoption"));
    }

    #[test]
    fn test_expand_home() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~/x.md"), home.join("x.md"));
            assert_eq!(expand_home("~"), home);
        }
        assert_eq!(expand_home("a/~b"), PathBuf::from("a/~b"));
    }

    #[tokio::test]
    async fn test_existing_file_read_exactly() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("style.txt");
        std::fs::write(&path, "  Terse.\n\nDry humor.\n").unwrap();

        let text = offline_reader().resolve(path.to_str().unwrap()).await;
        assert_eq!(text, "  Terse.\n\nDry humor.\n");
    }

    #[tokio::test]
    async fn test_literal_text_unchanged() {
        let text = offline_reader()
            .resolve("Why small teams ship faster: notes from three launches")
            .await;
        assert_eq!(text, "Why small teams ship faster: notes from three launches");
    }

    #[tokio::test]
    async fn test_missing_path_is_empty() {
        let reader = offline_reader();
        assert_eq!(reader.resolve("/definitely/not/here.md").await, "");
        assert_eq!(reader.resolve("./missing.md").await, "");
        assert!(matches!(
            reader.try_resolve("~/missing-docgen-file.md").await,
            Err(AppError::Input(_))
        ));
    }

    #[tokio::test]
    async fn test_hosted_without_store_is_empty() {
        let reader = offline_reader();
        let url = "https://docs.google.com/document/d/ABC/edit";
        assert_eq!(reader.resolve(url).await, "");
        assert!(matches!(
            reader.try_resolve(url).await,
            Err(AppError::Storage(_))
        ));
    }

    #[tokio::test]
    async fn test_hosted_routing() {
        let store = Arc::new(RecordingStore::default());
        let reader = SourceReader::new(Arc::new(LazyStore::with_store(store.clone())));

        assert_eq!(
            reader
                .resolve("https://docs.google.com/document/d/A/edit")
                .await,
            "document text"
        );
        assert_eq!(
            reader.resolve("https://drive.google.com/file/d/B/view").await,
            "file text"
        );

        let calls = store.calls.lock().unwrap().clone();
        assert_eq!(
            calls,
            vec![
                "doc https://docs.google.com/document/d/A/edit".to_string(),
                "file https://drive.google.com/file/d/B/view".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_relative_path_uses_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::create_dir(temp_dir.path().join("notes")).unwrap();
        std::fs::write(temp_dir.path().join("notes/topic.md"), "Topic from workspace").unwrap();

        let reader = offline_reader().with_base_dir(temp_dir.path());
        assert_eq!(reader.locate("notes/topic.md"), temp_dir.path().join("notes/topic.md"));
        assert_eq!(reader.resolve("notes/topic.md").await, "Topic from workspace");
        assert_eq!(reader.resolve("./notes/topic.md").await, "Topic from workspace");

        // absolute paths ignore the base
        assert_eq!(reader.locate("/etc/hosts"), PathBuf::from("/etc/hosts"));
    }

    #[tokio::test]
    async fn test_legacy_doc_reads_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("old.doc");
        std::fs::write(&path, b"\xd0\xcf\x11\xe0").unwrap();

        assert_eq!(offline_reader().resolve(path.to_str().unwrap()).await, "");
    }
}
