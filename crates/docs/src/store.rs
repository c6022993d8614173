//! Hosted-storage abstraction.

use crate::google::GoogleDrive;
use docgen_core::{AppError, AppResult};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Operations the CLI needs from a hosted document store.
///
/// All failures are reported as `AppError::Storage`; callers decide how to
/// degrade (empty text on read, local save on write).
#[async_trait::async_trait]
pub trait DocumentStore: Send + Sync {
    /// Plain text of a hosted document, runs concatenated in body order.
    async fn read_document(&self, url: &str) -> AppResult<String>;

    /// Plain text of any hosted file.
    async fn read_file(&self, url: &str) -> AppResult<String>;

    /// Create a formatted document, optionally inside a folder. Returns its URL.
    async fn create_document(
        &self,
        title: &str,
        content: &str,
        folder_id: Option<&str>,
    ) -> AppResult<String>;

    /// Upload `content` as a plain-text file into the folder at `folder_url`.
    async fn upload_to_folder(
        &self,
        folder_url: &str,
        filename: &str,
        content: &str,
    ) -> AppResult<String>;
}

enum Connector {
    Google {
        credentials_path: PathBuf,
        token_path: PathBuf,
    },
    Disabled,
}

/// A store connected on first use.
///
/// Connecting to Google may start an interactive consent flow, so it only
/// happens once some input or output actually points at Google. A failed
/// connection is remembered for the rest of the run.
pub struct LazyStore {
    connector: Connector,
    cell: OnceCell<Option<Arc<dyn DocumentStore>>>,
}

impl LazyStore {
    /// Connect to Google Docs/Drive with the given OAuth files when first needed.
    pub fn google(credentials_path: impl Into<PathBuf>, token_path: impl Into<PathBuf>) -> Self {
        Self {
            connector: Connector::Google {
                credentials_path: credentials_path.into(),
                token_path: token_path.into(),
            },
            cell: OnceCell::new(),
        }
    }

    /// Use an already connected store.
    pub fn with_store(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            connector: Connector::Disabled,
            cell: OnceCell::new_with(Some(Some(store))),
        }
    }

    /// Never connect.
    pub fn disabled() -> Self {
        Self {
            connector: Connector::Disabled,
            cell: OnceCell::new(),
        }
    }

    /// The connected store, or `None` if storage is unavailable.
    pub async fn get(&self) -> Option<Arc<dyn DocumentStore>> {
        self.cell
            .get_or_init(|| async { self.connect().await })
            .await
            .clone()
    }

    async fn connect(&self) -> Option<Arc<dyn DocumentStore>> {
        let Connector::Google {
            credentials_path,
            token_path,
        } = &self.connector
        else {
            return None;
        };

        match GoogleDrive::connect(credentials_path, token_path).await {
            Ok(drive) => {
                tracing::info!("Google Drive integration available");
                let store: Arc<dyn DocumentStore> = Arc::new(drive);
                Some(store)
            }
            Err(AppError::CredentialsMissing(msg)) => {
                tracing::warn!("Google Drive integration not configured: {}", msg);
                None
            }
            Err(e) => {
                tracing::warn!("Google Drive not available: {}", e);
                None
            }
        }
    }
}
