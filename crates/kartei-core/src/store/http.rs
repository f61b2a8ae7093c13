//! Reqwest implementation of [`StudyStore`] against the study backend.

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use tracing::debug;

use super::{StoreError, StoreFuture, StudyStore};
use crate::model::{Annotation, Document, Flashcard, ProcessOutcome, ProcessRequest};

/// Fallback shown when an upload rejection carries no `detail` message.
const UPLOAD_FALLBACK: &str = "Upload failed";

pub struct HttpStore {
    base_url: String,
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .pool_max_idle_per_host(2)
            .pool_idle_timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, StoreError> {
        let url = self.url(path);
        debug!(%url, "store GET");
        let resp = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(StoreError::request)?;
        let status = resp.status();
        if !status.is_success() {
            return Err(StoreError::Status(status.as_u16()));
        }
        resp.json().await.map_err(|e| StoreError::Decode(e.to_string()))
    }
}

impl StudyStore for HttpStore {
    fn list_documents(&self) -> StoreFuture<'_, Vec<Document>> {
        Box::pin(self.get_json("/api/documents"))
    }

    fn fetch_document<'a>(&'a self, id: &'a str) -> StoreFuture<'a, Vec<u8>> {
        Box::pin(async move {
            let url = self.url(&format!("/api/documents/{}", id));
            debug!(%url, "store fetch document");
            let resp = self
                .client
                .get(&url)
                .timeout(self.timeout)
                .send()
                .await
                .map_err(StoreError::request)?;
            let status = resp.status();
            if !status.is_success() {
                return Err(StoreError::Status(status.as_u16()));
            }
            let bytes = resp.bytes().await.map_err(StoreError::request)?;
            Ok(bytes.to_vec())
        })
    }

    fn list_annotations<'a>(&'a self, document_id: &'a str) -> StoreFuture<'a, Vec<Annotation>> {
        Box::pin(async move {
            let path = format!("/api/annotations/{}", document_id);
            self.get_json(&path).await
        })
    }

    fn list_flashcards(&self) -> StoreFuture<'_, Vec<Flashcard>> {
        Box::pin(self.get_json("/api/flashcards"))
    }

    fn process<'a>(&'a self, request: &'a ProcessRequest) -> StoreFuture<'a, ProcessOutcome> {
        Box::pin(async move {
            let mut form = Form::new()
                .text("document_id", request.document_id.clone())
                .text("action", request.action.as_str())
                .text("text", request.text.clone());
            if let Some(ref note) = request.note {
                form = form.text("note", note.clone());
            }

            let url = self.url("/api/process");
            debug!(%url, action = request.action.as_str(), "store process");
            let resp = self
                .client
                .post(&url)
                .multipart(form)
                .timeout(self.timeout)
                .send()
                .await
                .map_err(StoreError::request)?;
            let status = resp.status();
            if !status.is_success() {
                return Err(StoreError::Status(status.as_u16()));
            }
            resp.json().await.map_err(|e| StoreError::Decode(e.to_string()))
        })
    }

    fn upload<'a>(&'a self, filename: &'a str, bytes: Vec<u8>) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            let part = Part::bytes(bytes)
                .file_name(filename.to_string())
                .mime_str("application/pdf")
                .map_err(|e| StoreError::Request(e.to_string()))?;
            let form = Form::new().part("file", part);

            let url = self.url("/api/upload");
            debug!(%url, filename, "store upload");
            let resp = self
                .client
                .post(&url)
                .multipart(form)
                .timeout(self.timeout)
                .send()
                .await
                .map_err(|e| StoreError::Upload(e.to_string()))?;

            if resp.status().is_success() {
                return Ok(());
            }

            // The backend reports rejections as {"detail": "..."}.
            let detail = resp
                .json::<serde_json::Value>()
                .await
                .ok()
                .and_then(|v| v["detail"].as_str().map(|s| s.to_string()))
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| UPLOAD_FALLBACK.to_string());
            Err(StoreError::Upload(detail))
        })
    }
}
