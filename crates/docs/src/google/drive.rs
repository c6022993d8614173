//! Docs v1 / Drive v3 client.

use super::auth::GoogleAuth;
use super::ids::extract_id;
use super::types::{BatchUpdateRequest, Document, FileMetadata};
use crate::format::format_markdown;
use crate::store::DocumentStore;
use docgen_core::{AppError, AppResult};
use std::path::Path;
use uuid::Uuid;

const DOCS_BASE_URL: &str = "https://docs.googleapis.com";
const API_BASE_URL: &str = "https://www.googleapis.com";
const GOOGLE_DOC_MIME: &str = "application/vnd.google-apps.document";
const GOOGLE_APPS_MIME_PREFIX: &str = "application/vnd.google-apps.";

/// Authenticated access to a user's Docs and Drive.
pub struct GoogleDrive {
    client: reqwest::Client,
    access_token: String,
    docs_base: String,
    api_base: String,
}

impl GoogleDrive {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self::with_base_urls(access_token, DOCS_BASE_URL, API_BASE_URL)
    }

    /// Point the client at other hosts (used by tests against a mock server).
    pub fn with_base_urls(
        access_token: impl Into<String>,
        docs_base: impl Into<String>,
        api_base: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            access_token: access_token.into(),
            docs_base: docs_base.into().trim_end_matches('/').to_string(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
        }
    }

    /// Authenticate with the given OAuth files and build a client.
    pub async fn connect(credentials_path: &Path, token_path: &Path) -> AppResult<Self> {
        let token = GoogleAuth::new(credentials_path, token_path)
            .authenticate()
            .await?;
        Ok(Self::new(token.access_token))
    }

    fn docs_url(&self, rest: &str) -> String {
        format!("{}/v1/documents{}", self.docs_base, rest)
    }

    fn files_url(&self, id: &str) -> String {
        format!("{}/drive/v3/files/{}", self.api_base, id)
    }

    async fn send(&self, request: reqwest::RequestBuilder, what: &str) -> AppResult<reqwest::Response> {
        let response = request
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("{} failed: {}", what, e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(AppError::Storage(format!(
                "{} failed (HTTP {}): {}",
                what, status, text
            )));
        }

        Ok(response)
    }

    async fn send_json<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        what: &str,
    ) -> AppResult<T> {
        self.send(request, what)
            .await?
            .json::<T>()
            .await
            .map_err(|e| AppError::Storage(format!("{}: unexpected response: {}", what, e)))
    }

    async fn send_text(&self, request: reqwest::RequestBuilder, what: &str) -> AppResult<String> {
        let bytes = self
            .send(request, what)
            .await?
            .bytes()
            .await
            .map_err(|e| AppError::Storage(format!("{} failed: {}", what, e)))?;
        String::from_utf8(bytes.to_vec())
            .map_err(|_| AppError::Storage(format!("{}: content is not UTF-8 text", what)))
    }

    async fn document_text(&self, id: &str) -> AppResult<String> {
        let document: Document = self
            .send_json(self.client.get(self.docs_url(&format!("/{}", id))), "Reading Google Doc")
            .await?;
        Ok(document.plain_text())
    }

    async fn move_to_folder(&self, file_id: &str, folder_id: &str) -> AppResult<()> {
        let metadata: FileMetadata = self
            .send_json(
                self.client
                    .get(self.files_url(file_id))
                    .query(&[("fields", "parents")]),
                "Reading file parents",
            )
            .await?;
        let previous = metadata.parents.join(",");

        self.send(
            self.client
                .patch(self.files_url(file_id))
                .query(&[
                    ("addParents", folder_id),
                    ("removeParents", previous.as_str()),
                    ("fields", "id,parents"),
                ]),
            "Moving document to folder",
        )
        .await?;
        Ok(())
    }
}

fn required_id(url: &str) -> AppResult<String> {
    extract_id(url).ok_or_else(|| AppError::Storage(format!("Could not extract ID from {}", url)))
}

/// A fresh boundary per upload so no content can collide with it.
fn multipart_boundary() -> String {
    format!("docgen-{}", Uuid::new_v4().simple())
}

fn multipart_body(boundary: &str, metadata: &serde_json::Value, content: &str) -> String {
    format!(
        "--{b}\r\nContent-Type: application/json; charset=UTF-8\r\n\r\n{meta}\r\n\
         --{b}\r\nContent-Type: text/plain; charset=UTF-8\r\n\r\n{content}\r\n--{b}--\r\n",
        b = boundary,
        meta = metadata,
        content = content
    )
}

#[async_trait::async_trait]
impl DocumentStore for GoogleDrive {
    async fn read_document(&self, url: &str) -> AppResult<String> {
        let id = required_id(url)?;
        let text = self.document_text(&id).await?;
        tracing::info!("Read {} characters from Google Doc", text.chars().count());
        Ok(text)
    }

    async fn read_file(&self, url: &str) -> AppResult<String> {
        let id = required_id(url)?;
        let metadata: FileMetadata = self
            .send_json(
                self.client
                    .get(self.files_url(&id))
                    .query(&[("fields", "name,mimeType")]),
                "Reading file metadata",
            )
            .await?;
        let mime = metadata.mime_type.unwrap_or_default();
        tracing::debug!("Drive file {} has type {}", id, mime);

        let text = if mime == GOOGLE_DOC_MIME {
            self.document_text(&id).await?
        } else if mime.starts_with(GOOGLE_APPS_MIME_PREFIX) {
            self.send_text(
                self.client
                    .get(format!("{}/export", self.files_url(&id)))
                    .query(&[("mimeType", "text/plain")]),
                "Exporting Drive file",
            )
            .await?
        } else {
            self.send_text(
                self.client
                    .get(self.files_url(&id))
                    .query(&[("alt", "media")]),
                "Downloading Drive file",
            )
            .await?
        };

        tracing::info!("Read {} characters from Google Drive", text.chars().count());
        Ok(text)
    }

    async fn create_document(
        &self,
        title: &str,
        content: &str,
        folder_id: Option<&str>,
    ) -> AppResult<String> {
        let document: Document = self
            .send_json(
                self.client
                    .post(self.docs_url(""))
                    .json(&serde_json::json!({ "title": title })),
                "Creating Google Doc",
            )
            .await?;
        let id = document.document_id;

        let formatted = format_markdown(content);
        if !formatted.text.is_empty() {
            let requests = formatted.to_requests();
            self.send(
                self.client
                    .post(self.docs_url(&format!("/{}:batchUpdate", id)))
                    .json(&BatchUpdateRequest {
                        requests: &requests,
                    }),
                "Writing Google Doc content",
            )
            .await?;
        }

        let url = format!("https://docs.google.com/document/d/{}/edit", id);

        // The document is complete at this point; a failed move leaves it in My Drive.
        if let Some(folder_id) = folder_id {
            if let Err(e) = self.move_to_folder(&id, folder_id).await {
                tracing::warn!(
                    "Created {} but could not move it to folder {}: {}",
                    url,
                    folder_id,
                    e
                );
            }
        }

        tracing::info!("Created Google Doc: {}", url);
        Ok(url)
    }

    async fn upload_to_folder(
        &self,
        folder_url: &str,
        filename: &str,
        content: &str,
    ) -> AppResult<String> {
        let folder_id = extract_id(folder_url).ok_or_else(|| {
            AppError::Storage(format!("Could not extract folder ID from {}", folder_url))
        })?;

        let metadata = serde_json::json!({ "name": filename, "parents": [folder_id] });
        let boundary = multipart_boundary();
        let uploaded: FileMetadata = self
            .send_json(
                self.client
                    .post(format!("{}/upload/drive/v3/files", self.api_base))
                    .query(&[("uploadType", "multipart"), ("fields", "id,webViewLink")])
                    .header(
                        reqwest::header::CONTENT_TYPE,
                        format!("multipart/related; boundary={}", boundary),
                    )
                    .body(multipart_body(&boundary, &metadata, content)),
                "Uploading to Google Drive",
            )
            .await?;

        let url = uploaded
            .web_view_link
            .or_else(|| {
                uploaded
                    .id
                    .map(|id| format!("https://drive.google.com/file/d/{}/view", id))
            })
            .ok_or_else(|| AppError::Storage("Upload response had no link".to_string()))?;

        tracing::info!("Uploaded to Google Drive: {}", url);
        Ok(url)
    }
}
