use mupdf::{Document, TextPageFlags};

use kartei_core::{DocumentPages, PageRenderer, RenderError, RenderedPage, TextLine};

/// MuPDF-based implementation of [`PageRenderer`].
///
/// This crate is the sole AGPL island — it isolates the mupdf dependency
/// so that non-rendering code paths do not transitively depend on it.
#[derive(Default)]
pub struct MupdfRenderer;

impl MupdfRenderer {
    pub fn new() -> Self {
        Self
    }
}

/// Open handle over an in-memory PDF.
///
/// MuPDF's document type is not `Send`, so the handle keeps the raw
/// bytes and re-opens the document for each page render. MuPDF caches
/// parsed structures internally, so repeated opens stay cheap.
struct MupdfPages {
    bytes: Vec<u8>,
    page_count: usize,
}

impl PageRenderer for MupdfRenderer {
    fn open(&self, bytes: &[u8]) -> Result<Box<dyn DocumentPages>, RenderError> {
        let document = Document::from_bytes(bytes, "application/pdf")
            .map_err(|e| RenderError::Open(e.to_string()))?;
        let page_count = document
            .page_count()
            .map_err(|e| RenderError::Open(e.to_string()))? as usize;

        Ok(Box::new(MupdfPages {
            bytes: bytes.to_vec(),
            page_count,
        }))
    }
}

impl DocumentPages for MupdfPages {
    fn page_count(&self) -> usize {
        self.page_count
    }

    fn render_page(&self, number: usize, zoom: f32) -> Result<RenderedPage, RenderError> {
        let render_err = |e: String| RenderError::Render {
            page: number,
            message: e,
        };

        if number == 0 || number > self.page_count {
            return Err(render_err(format!(
                "page out of range (1..={})",
                self.page_count
            )));
        }

        let document = Document::from_bytes(&self.bytes, "application/pdf")
            .map_err(|e| RenderError::Open(e.to_string()))?;
        let page = document
            .load_page((number - 1) as i32)
            .map_err(|e| render_err(e.to_string()))?;

        let bounds = page.bounds().map_err(|e| render_err(e.to_string()))?;
        let width = (bounds.x1 - bounds.x0) * zoom;
        let height = (bounds.y1 - bounds.y0) * zoom;

        let text_page = page
            .to_text_page(TextPageFlags::empty())
            .map_err(|e| render_err(e.to_string()))?;

        // Block/line iteration keeps reading order; coordinates are
        // scaled into the zoomed surface so the overlay lines up.
        let mut lines = Vec::new();
        for block in text_page.blocks() {
            for line in block.lines() {
                let text: String = line
                    .chars()
                    .map(|c| c.char().unwrap_or('\u{FFFD}'))
                    .collect();
                if text.trim().is_empty() {
                    continue;
                }
                let bbox = line.bounds();
                lines.push(TextLine {
                    text,
                    x0: (bbox.x0 - bounds.x0) * zoom,
                    y0: (bbox.y0 - bounds.y0) * zoom,
                    x1: (bbox.x1 - bounds.x0) * zoom,
                    y1: (bbox.y1 - bounds.y0) * zoom,
                });
            }
        }

        Ok(RenderedPage {
            number,
            width,
            height,
            lines,
        })
    }
}
