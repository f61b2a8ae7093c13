use std::path::PathBuf;

use kartei_core::{Annotation, Document, Flashcard, ProcessOutcome, ProcessRequest, RenderedPage};

/// Commands sent from the controller to the backend task.
#[derive(Debug)]
pub enum BackendCommand {
    /// Fetch the document collection.
    LoadDocuments,
    /// Fetch and render one document. `generation` tags every resulting
    /// event; the controller discards events from stale generations.
    LoadDocument { id: String, generation: u64 },
    /// Run a processing action on the captured selection. The backend
    /// refreshes annotations and flashcards after a successful call.
    Process { request: ProcessRequest },
    /// Upload a PDF from the local filesystem.
    Upload { path: PathBuf },
}

/// Events flowing from the backend task to the controller.
#[derive(Debug)]
pub enum BackendEvent {
    DocumentsLoaded {
        documents: Vec<Document>,
    },
    DocumentsFailed {
        error: String,
    },
    /// Document bytes fetched and opened; pages follow one by one.
    DocumentOpened {
        generation: u64,
        page_count: usize,
    },
    /// One rendered page. Pages arrive strictly in ascending order.
    PageRendered {
        generation: u64,
        page: RenderedPage,
    },
    DocumentFailed {
        generation: u64,
        error: String,
    },
    AnnotationsLoaded {
        document_id: String,
        items: Vec<Annotation>,
    },
    FlashcardsLoaded {
        items: Vec<Flashcard>,
    },
    ProcessFinished {
        outcome: ProcessOutcome,
    },
    ProcessFailed {
        error: String,
    },
    UploadFinished,
    /// Upload rejection with the backend's detail message.
    UploadFailed {
        message: String,
    },
}
