//! Study-store trait and implementations for the backend HTTP API.

pub mod http;
pub mod mock;

use std::future::Future;
use std::pin::Pin;

use thiserror::Error;

use crate::model::{Annotation, Document, Flashcard, ProcessOutcome, ProcessRequest};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("request failed: {0}")]
    Request(String),
    #[error("backend returned HTTP {0}")]
    Status(u16),
    #[error("failed to decode response: {0}")]
    Decode(String),
    /// Upload rejection with the backend's `detail` message (or the
    /// fixed fallback when the body carries none).
    #[error("{0}")]
    Upload(String),
}

impl StoreError {
    pub(crate) fn request(e: reqwest::Error) -> Self {
        StoreError::Request(e.to_string())
    }
}

pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + Send + 'a>>;

/// The backend collaborator owning documents, annotations, and
/// flashcards. One method per endpoint; all persistence lives behind it.
pub trait StudyStore: Send + Sync {
    /// GET /api/documents
    fn list_documents(&self) -> StoreFuture<'_, Vec<Document>>;

    /// GET /api/documents/{id} — raw PDF bytes.
    fn fetch_document<'a>(&'a self, id: &'a str) -> StoreFuture<'a, Vec<u8>>;

    /// GET /api/annotations/{id}
    fn list_annotations<'a>(&'a self, document_id: &'a str) -> StoreFuture<'a, Vec<Annotation>>;

    /// GET /api/flashcards — global list, not per-document.
    fn list_flashcards(&self) -> StoreFuture<'_, Vec<Flashcard>>;

    /// POST /api/process — run an action on selected text.
    fn process<'a>(&'a self, request: &'a ProcessRequest) -> StoreFuture<'a, ProcessOutcome>;

    /// POST /api/upload — multipart file upload. A non-OK response is
    /// reported as [`StoreError::Upload`] with the backend's message.
    fn upload<'a>(&'a self, filename: &'a str, bytes: Vec<u8>) -> StoreFuture<'a, ()>;
}
