//! Core types and collaborator seams for the kartei PDF study client.
//!
//! The controller in `kartei-tui` talks to two external collaborators,
//! both behind traits defined here:
//!
//! - [`StudyStore`] — the HTTP backend owning documents, annotations,
//!   and flashcards ([`HttpStore`] is the production implementation).
//! - [`PageRenderer`] — the PDF rendering library producing page
//!   surfaces with an extractable text overlay.

pub mod model;
pub mod render;
pub mod store;

pub use model::{
    Annotation, Document, Flashcard, ProcessAction, ProcessOutcome, ProcessRequest,
};
pub use render::{DocumentPages, PageRenderer, RenderError, RenderedPage, TextLine};
pub use store::http::HttpStore;
pub use store::{StoreError, StudyStore};
