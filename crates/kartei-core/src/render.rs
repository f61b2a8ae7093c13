//! Renderer seam: the external PDF library behind a trait.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("failed to open document: {0}")]
    Open(String),
    #[error("failed to render page {page}: {message}")]
    Render { page: usize, message: String },
}

/// A line of extractable text aligned to the rendered page surface.
///
/// Coordinates are in zoomed page units, origin top-left, so the overlay
/// lines up with a surface of `width` x `height` from [`RenderedPage`].
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

/// One rendered page: the surface dimensions plus the selectable text
/// overlay in reading order. Page numbers are 1-based.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPage {
    pub number: usize,
    pub width: f32,
    pub height: f32,
    pub lines: Vec<TextLine>,
}

/// An open document handle produced by a [`PageRenderer`].
pub trait DocumentPages: Send {
    fn page_count(&self) -> usize;

    /// Render the given 1-based page at the given zoom factor.
    fn render_page(&self, number: usize, zoom: f32) -> Result<RenderedPage, RenderError>;
}

/// Trait for PDF page rendering backends.
///
/// Implementors own the low-level library binding; the controller only
/// sees page surfaces and text overlays. `kartei-render-mupdf` is the
/// production implementation.
pub trait PageRenderer: Send + Sync {
    /// Open a document from its raw byte stream.
    fn open(&self, bytes: &[u8]) -> Result<Box<dyn DocumentPages>, RenderError>;
}
