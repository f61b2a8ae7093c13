//! Mock study store for testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use super::{StoreError, StoreFuture, StudyStore};
use crate::model::{Annotation, Document, Flashcard, ProcessOutcome, ProcessRequest};

/// A hand-rolled mock implementing [`StudyStore`] for tests.
///
/// Supports canned responses per operation, an injectable upload
/// rejection, optional per-call latency, and call counting.
#[derive(Default)]
pub struct MockStore {
    documents: Mutex<Vec<Document>>,
    document_bytes: Mutex<HashMap<String, Vec<u8>>>,
    annotations: Mutex<HashMap<String, Vec<Annotation>>>,
    flashcards: Mutex<Vec<Flashcard>>,
    process_result: Mutex<Option<String>>,
    upload_error: Mutex<Option<String>>,
    delay: Option<Duration>,

    list_calls: AtomicUsize,
    fetch_calls: AtomicUsize,
    annotation_calls: AtomicUsize,
    flashcard_calls: AtomicUsize,
    process_calls: AtomicUsize,
    upload_calls: AtomicUsize,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_documents(self, docs: Vec<Document>) -> Self {
        *self.documents.lock().unwrap() = docs;
        self
    }

    pub fn with_document_bytes(self, id: &str, bytes: Vec<u8>) -> Self {
        self.document_bytes
            .lock()
            .unwrap()
            .insert(id.to_string(), bytes);
        self
    }

    pub fn with_annotations(self, document_id: &str, items: Vec<Annotation>) -> Self {
        self.annotations
            .lock()
            .unwrap()
            .insert(document_id.to_string(), items);
        self
    }

    pub fn with_flashcards(self, items: Vec<Flashcard>) -> Self {
        *self.flashcards.lock().unwrap() = items;
        self
    }

    pub fn with_process_result(self, result: &str) -> Self {
        *self.process_result.lock().unwrap() = Some(result.to_string());
        self
    }

    /// Make `upload` fail with the given backend detail message.
    pub fn with_upload_error(self, detail: &str) -> Self {
        *self.upload_error.lock().unwrap() = Some(detail.to_string());
        self
    }

    /// Set simulated network latency per call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn annotation_calls(&self) -> usize {
        self.annotation_calls.load(Ordering::SeqCst)
    }

    pub fn flashcard_calls(&self) -> usize {
        self.flashcard_calls.load(Ordering::SeqCst)
    }

    pub fn process_calls(&self) -> usize {
        self.process_calls.load(Ordering::SeqCst)
    }

    pub fn upload_calls(&self) -> usize {
        self.upload_calls.load(Ordering::SeqCst)
    }

    async fn pause(&self) {
        if let Some(d) = self.delay {
            tokio::time::sleep(d).await;
        }
    }
}

impl StudyStore for MockStore {
    fn list_documents(&self) -> StoreFuture<'_, Vec<Document>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        Box::pin(async move {
            self.pause().await;
            Ok(self.documents.lock().unwrap().clone())
        })
    }

    fn fetch_document<'a>(&'a self, id: &'a str) -> StoreFuture<'a, Vec<u8>> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        Box::pin(async move {
            self.pause().await;
            self.document_bytes
                .lock()
                .unwrap()
                .get(id)
                .cloned()
                .ok_or(StoreError::Status(404))
        })
    }

    fn list_annotations<'a>(&'a self, document_id: &'a str) -> StoreFuture<'a, Vec<Annotation>> {
        self.annotation_calls.fetch_add(1, Ordering::SeqCst);
        Box::pin(async move {
            self.pause().await;
            Ok(self
                .annotations
                .lock()
                .unwrap()
                .get(document_id)
                .cloned()
                .unwrap_or_default())
        })
    }

    fn list_flashcards(&self) -> StoreFuture<'_, Vec<Flashcard>> {
        self.flashcard_calls.fetch_add(1, Ordering::SeqCst);
        Box::pin(async move {
            self.pause().await;
            Ok(self.flashcards.lock().unwrap().clone())
        })
    }

    fn process<'a>(&'a self, _request: &'a ProcessRequest) -> StoreFuture<'a, ProcessOutcome> {
        self.process_calls.fetch_add(1, Ordering::SeqCst);
        Box::pin(async move {
            self.pause().await;
            match self.process_result.lock().unwrap().clone() {
                Some(result) => Ok(ProcessOutcome { result }),
                None => Err(StoreError::Status(500)),
            }
        })
    }

    fn upload<'a>(&'a self, _filename: &'a str, _bytes: Vec<u8>) -> StoreFuture<'a, ()> {
        self.upload_calls.fetch_add(1, Ordering::SeqCst);
        Box::pin(async move {
            self.pause().await;
            match self.upload_error.lock().unwrap().clone() {
                Some(detail) => Err(StoreError::Upload(detail)),
                None => Ok(()),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_counts_calls_and_serves_documents() {
        let store = MockStore::new().with_documents(vec![Document {
            id: "d1".into(),
            name: "a.pdf".into(),
        }]);

        let docs = store.list_documents().await.unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(store.list_calls(), 1);
    }

    #[tokio::test]
    async fn mock_upload_error_carries_detail() {
        let store = MockStore::new().with_upload_error("bad file");
        let err = store.upload("x.pdf", vec![]).await.unwrap_err();
        match err {
            StoreError::Upload(detail) => assert_eq!(detail, "bad file"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn mock_missing_document_is_404() {
        let store = MockStore::new();
        let err = store.fetch_document("nope").await.unwrap_err();
        assert!(matches!(err, StoreError::Status(404)));
    }
}
