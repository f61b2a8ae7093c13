use kartei_core::Document;

/// Placeholder entry shown when the backend has no documents yet.
pub const EMPTY_PLACEHOLDER: &str = "Upload a PDF to get started";

/// State of the document panel: the selectable list of backend documents.
///
/// When the collection is empty the panel shows exactly one disabled
/// placeholder entry and nothing is selectable.
#[derive(Debug, Default)]
pub struct DocumentListState {
    pub entries: Vec<Document>,
    pub cursor: usize,
}

impl DocumentListState {
    /// Replace the list with a fresh fetch, resetting the cursor.
    pub fn set_documents(&mut self, documents: Vec<Document>) {
        self.entries = documents;
        self.cursor = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn selected(&self) -> Option<&Document> {
        self.entries.get(self.cursor)
    }

    pub fn move_down(&mut self) {
        if self.cursor + 1 < self.entries.len() {
            self.cursor += 1;
        }
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }
}
