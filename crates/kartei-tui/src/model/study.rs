use kartei_core::{Annotation, Flashcard};

/// Read-only display state for the study panel: the current document's
/// annotations and the global flashcard list.
#[derive(Debug, Default)]
pub struct StudyState {
    pub annotations: Vec<Annotation>,
    pub flashcards: Vec<Flashcard>,
    pub scroll: usize,
}

impl StudyState {
    pub fn clear(&mut self) {
        self.annotations.clear();
        self.flashcards.clear();
        self.scroll = 0;
    }

    /// Total number of display rows (used for scroll clamping).
    pub fn row_count(&self) -> usize {
        // Each annotation renders as 3 lines, each flashcard as 2,
        // plus the two section headers.
        2 + self.annotations.len() * 3 + self.flashcards.len() * 2
    }

    pub fn scroll_down(&mut self, visible: usize) {
        let max = self.row_count().saturating_sub(visible.max(1));
        if self.scroll < max {
            self.scroll += 1;
        }
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }
}
