use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use kartei_core::{PageRenderer, StoreError, StudyStore};

use crate::tui_event::{BackendCommand, BackendEvent};

/// Fixed zoom factor for page surfaces.
const ZOOM: f32 = 1.3;

/// Backend command listener: executes store/renderer work off the UI
/// loop and streams results back as events.
///
/// Each command runs in its own task so a long document load does not
/// block later commands; the controller's generation counter discards
/// events from loads that have been superseded.
pub async fn run(
    store: Arc<dyn StudyStore>,
    renderer: Arc<dyn PageRenderer>,
    mut cmd_rx: mpsc::UnboundedReceiver<BackendCommand>,
    event_tx: mpsc::UnboundedSender<BackendEvent>,
    cancel: CancellationToken,
) {
    loop {
        let cmd = tokio::select! {
            _ = cancel.cancelled() => break,
            cmd = cmd_rx.recv() => match cmd {
                Some(cmd) => cmd,
                None => break,
            },
        };

        let store = store.clone();
        let renderer = renderer.clone();
        let tx = event_tx.clone();

        match cmd {
            BackendCommand::LoadDocuments => {
                tokio::spawn(async move {
                    load_documents(&*store, &tx).await;
                });
            }
            BackendCommand::LoadDocument { id, generation } => {
                tokio::spawn(async move {
                    load_document(&*store, &*renderer, &id, generation, &tx).await;
                });
            }
            BackendCommand::Process { request } => {
                tokio::spawn(async move {
                    process(&*store, request, &tx).await;
                });
            }
            BackendCommand::Upload { path } => {
                tokio::spawn(async move {
                    upload(&*store, &path, &tx).await;
                });
            }
        }
    }
}

async fn load_documents(store: &dyn StudyStore, tx: &mpsc::UnboundedSender<BackendEvent>) {
    match store.list_documents().await {
        Ok(documents) => {
            info!(count = documents.len(), "document list loaded");
            let _ = tx.send(BackendEvent::DocumentsLoaded { documents });
        }
        Err(e) => {
            warn!(error = %e, "document list failed");
            let _ = tx.send(BackendEvent::DocumentsFailed {
                error: e.to_string(),
            });
        }
    }
}

/// Fetch a document's bytes and render every page strictly in ascending
/// order: page N's render completes (and its event is sent) before page
/// N+1 begins. Afterwards the document's annotations and the global
/// flashcard list are loaded.
async fn load_document(
    store: &dyn StudyStore,
    renderer: &dyn PageRenderer,
    id: &str,
    generation: u64,
    tx: &mpsc::UnboundedSender<BackendEvent>,
) {
    let bytes = match store.fetch_document(id).await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(id, error = %e, "document fetch failed");
            let _ = tx.send(BackendEvent::DocumentFailed {
                generation,
                error: e.to_string(),
            });
            return;
        }
    };

    // Rendering is CPU-bound; run the whole sequential page loop on a
    // blocking thread and emit each page as it completes.
    let pages = match renderer.open(&bytes) {
        Ok(pages) => pages,
        Err(e) => {
            let _ = tx.send(BackendEvent::DocumentFailed {
                generation,
                error: e.to_string(),
            });
            return;
        }
    };

    let page_count = pages.page_count();
    let _ = tx.send(BackendEvent::DocumentOpened {
        generation,
        page_count,
    });

    let tx_pages = tx.clone();
    let render_result = tokio::task::spawn_blocking(move || {
        for number in 1..=page_count {
            match pages.render_page(number, ZOOM) {
                Ok(page) => {
                    let _ = tx_pages.send(BackendEvent::PageRendered { generation, page });
                }
                Err(e) => return Err(e.to_string()),
            }
        }
        Ok(())
    })
    .await
    .unwrap_or_else(|e| Err(format!("render task failed: {}", e)));

    if let Err(error) = render_result {
        warn!(id, error, "page render failed");
        let _ = tx.send(BackendEvent::DocumentFailed { generation, error });
        return;
    }

    refresh_study_lists(store, id, tx).await;
}

async fn process(
    store: &dyn StudyStore,
    request: kartei_core::ProcessRequest,
    tx: &mpsc::UnboundedSender<BackendEvent>,
) {
    let document_id = request.document_id.clone();
    match store.process(&request).await {
        Ok(outcome) => {
            info!(action = request.action.as_str(), "process finished");
            let _ = tx.send(BackendEvent::ProcessFinished { outcome });
            refresh_study_lists(store, &document_id, tx).await;
        }
        Err(e) => {
            warn!(error = %e, "process failed");
            let _ = tx.send(BackendEvent::ProcessFailed {
                error: e.to_string(),
            });
        }
    }
}

async fn upload(
    store: &dyn StudyStore,
    path: &std::path::Path,
    tx: &mpsc::UnboundedSender<BackendEvent>,
) {
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "upload.pdf".to_string());

    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) => {
            let _ = tx.send(BackendEvent::UploadFailed {
                message: format!("Could not read {}: {}", path.display(), e),
            });
            return;
        }
    };

    match store.upload(&filename, bytes).await {
        Ok(()) => {
            info!(filename, "upload finished");
            let _ = tx.send(BackendEvent::UploadFinished);
        }
        Err(StoreError::Upload(message)) => {
            warn!(filename, message, "upload rejected");
            let _ = tx.send(BackendEvent::UploadFailed { message });
        }
        Err(e) => {
            let _ = tx.send(BackendEvent::UploadFailed {
                message: e.to_string(),
            });
        }
    }
}

/// Reload the annotation list for `document_id` and the global flashcard
/// list, mirroring the refresh the backend expects after a process call.
async fn refresh_study_lists(
    store: &dyn StudyStore,
    document_id: &str,
    tx: &mpsc::UnboundedSender<BackendEvent>,
) {
    match store.list_annotations(document_id).await {
        Ok(items) => {
            let _ = tx.send(BackendEvent::AnnotationsLoaded {
                document_id: document_id.to_string(),
                items,
            });
        }
        Err(e) => warn!(document_id, error = %e, "annotation refresh failed"),
    }

    match store.list_flashcards().await {
        Ok(items) => {
            let _ = tx.send(BackendEvent::FlashcardsLoaded { items });
        }
        Err(e) => warn!(error = %e, "flashcard refresh failed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kartei_core::store::mock::MockStore;
    use kartei_core::{
        Annotation, DocumentPages, Flashcard, ProcessAction, ProcessRequest, RenderError,
        RenderedPage,
    };

    /// Renderer stub producing empty pages with a fixed page count.
    struct StubRenderer {
        page_count: usize,
    }

    struct StubPages {
        page_count: usize,
    }

    impl PageRenderer for StubRenderer {
        fn open(&self, _bytes: &[u8]) -> Result<Box<dyn DocumentPages>, RenderError> {
            Ok(Box::new(StubPages {
                page_count: self.page_count,
            }))
        }
    }

    impl DocumentPages for StubPages {
        fn page_count(&self) -> usize {
            self.page_count
        }

        fn render_page(&self, number: usize, _zoom: f32) -> Result<RenderedPage, RenderError> {
            Ok(RenderedPage {
                number,
                width: 10.0,
                height: 10.0,
                lines: vec![],
            })
        }
    }

    #[tokio::test]
    async fn load_document_renders_pages_in_order_then_refreshes_lists() {
        let store = MockStore::new()
            .with_document_bytes("d1", vec![1, 2, 3])
            .with_annotations(
                "d1",
                vec![Annotation {
                    page: 1,
                    text: "t".into(),
                    note: "n".into(),
                }],
            )
            .with_flashcards(vec![Flashcard {
                front: "f".into(),
                back: "b".into(),
            }]);
        let renderer = StubRenderer { page_count: 3 };
        let (tx, mut rx) = mpsc::unbounded_channel();

        load_document(&store, &renderer, "d1", 7, &tx).await;

        match rx.try_recv().unwrap() {
            BackendEvent::DocumentOpened {
                generation,
                page_count,
            } => {
                assert_eq!(generation, 7);
                assert_eq!(page_count, 3);
            }
            other => panic!("unexpected event: {other:?}"),
        }
        for expected in 1..=3 {
            match rx.try_recv().unwrap() {
                BackendEvent::PageRendered { generation, page } => {
                    assert_eq!(generation, 7);
                    assert_eq!(page.number, expected);
                }
                other => panic!("unexpected event: {other:?}"),
            }
        }
        assert!(matches!(
            rx.try_recv().unwrap(),
            BackendEvent::AnnotationsLoaded { .. }
        ));
        assert!(matches!(
            rx.try_recv().unwrap(),
            BackendEvent::FlashcardsLoaded { .. }
        ));
    }

    #[tokio::test]
    async fn load_document_missing_reports_failure() {
        let store = MockStore::new();
        let renderer = StubRenderer { page_count: 0 };
        let (tx, mut rx) = mpsc::unbounded_channel();

        load_document(&store, &renderer, "gone", 1, &tx).await;

        assert!(matches!(
            rx.try_recv().unwrap(),
            BackendEvent::DocumentFailed { generation: 1, .. }
        ));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn process_success_refreshes_annotations_and_flashcards() {
        let store = MockStore::new().with_process_result("done");
        let (tx, mut rx) = mpsc::unbounded_channel();

        let request = ProcessRequest {
            document_id: "d1".into(),
            action: ProcessAction::Flashcard,
            text: "selected".into(),
            note: None,
        };
        process(&store, request, &tx).await;

        match rx.try_recv().unwrap() {
            BackendEvent::ProcessFinished { outcome } => assert_eq!(outcome.result, "done"),
            other => panic!("unexpected event: {other:?}"),
        }
        assert!(matches!(
            rx.try_recv().unwrap(),
            BackendEvent::AnnotationsLoaded { .. }
        ));
        assert!(matches!(
            rx.try_recv().unwrap(),
            BackendEvent::FlashcardsLoaded { .. }
        ));
        assert_eq!(store.annotation_calls(), 1);
        assert_eq!(store.flashcard_calls(), 1);
    }

    #[tokio::test]
    async fn process_failure_skips_refresh() {
        let store = MockStore::new(); // no canned result => 500
        let (tx, mut rx) = mpsc::unbounded_channel();

        let request = ProcessRequest {
            document_id: "d1".into(),
            action: ProcessAction::Annotate,
            text: "selected".into(),
            note: Some("note".into()),
        };
        process(&store, request, &tx).await;

        assert!(matches!(
            rx.try_recv().unwrap(),
            BackendEvent::ProcessFailed { .. }
        ));
        assert!(rx.try_recv().is_err());
        assert_eq!(store.annotation_calls(), 0);
    }

    #[tokio::test]
    async fn upload_rejection_carries_backend_detail() {
        let store = MockStore::new().with_upload_error("bad file");
        let (tx, mut rx) = mpsc::unbounded_channel();

        // Write a real temp file so the read step succeeds.
        let dir = std::env::temp_dir();
        let path = dir.join("kartei-upload-test.pdf");
        tokio::fs::write(&path, b"%PDF-1.4").await.unwrap();

        upload(&store, &path, &tx).await;
        let _ = tokio::fs::remove_file(&path).await;

        match rx.try_recv().unwrap() {
            BackendEvent::UploadFailed { message } => assert_eq!(message, "bad file"),
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
