use kartei_core::RenderedPage;

/// One visual row of the page area.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewRow {
    /// Separator header before each page.
    PageHeader(usize),
    /// A selectable text line belonging to `page`.
    Text { page: usize, line: String },
    /// Spacer between pages.
    Blank,
}

/// A position in the page area: (row index into `rows`, column in chars).
pub type Cell = (usize, usize);

/// State of the rendered page area: the stacked page rows, scroll
/// position, and the in-progress mouse selection.
#[derive(Debug, Default)]
pub struct PageViewState {
    pub page_count: usize,
    pub pages_loaded: usize,
    pub rows: Vec<ViewRow>,
    pub scroll: usize,
    /// Press position of an in-progress selection drag.
    anchor: Option<Cell>,
    /// Completed selection span (ordered), kept for highlight rendering.
    pub highlight: Option<(Cell, Cell)>,
}

impl PageViewState {
    /// Reset for a fresh document load.
    pub fn clear(&mut self) {
        self.page_count = 0;
        self.pages_loaded = 0;
        self.rows.clear();
        self.scroll = 0;
        self.anchor = None;
        self.highlight = None;
    }

    /// Append a rendered page. Pages arrive in ascending order, so the
    /// row list stays sorted by page number.
    pub fn push_page(&mut self, page: &RenderedPage) {
        self.rows.push(ViewRow::PageHeader(page.number));
        for line in &page.lines {
            self.rows.push(ViewRow::Text {
                page: page.number,
                line: line.text.trim_end().to_string(),
            });
        }
        self.rows.push(ViewRow::Blank);
        self.pages_loaded += 1;
    }

    /// The page number a given row belongs to, if it is a text row.
    pub fn page_of_row(&self, row: usize) -> Option<usize> {
        match self.rows.get(row) {
            Some(ViewRow::Text { page, .. }) => Some(*page),
            _ => None,
        }
    }

    pub fn begin_selection(&mut self, cell: Cell) {
        self.anchor = Some(cell);
        self.highlight = None;
    }

    pub fn drag_selection(&mut self, cell: Cell) {
        if let Some(anchor) = self.anchor {
            self.highlight = Some(ordered(anchor, cell));
        }
    }

    /// Complete the selection at the release position and return the
    /// covered text (untrimmed; the controller trims).
    pub fn complete_selection(&mut self, cell: Cell) -> String {
        let Some(anchor) = self.anchor.take() else {
            return String::new();
        };
        let (start, end) = ordered(anchor, cell);
        let text = self.extract(start, end);
        self.highlight = if text.trim().is_empty() {
            None
        } else {
            Some((start, end))
        };
        text
    }

    pub fn clear_selection(&mut self) {
        self.anchor = None;
        self.highlight = None;
    }

    fn extract(&self, start: Cell, end: Cell) -> String {
        let mut parts = Vec::new();
        let last_row = end.0.min(self.rows.len().saturating_sub(1));
        for row in start.0..=last_row {
            let Some(ViewRow::Text { line, .. }) = self.rows.get(row) else {
                continue;
            };
            let chars: Vec<char> = line.chars().collect();
            let from = if row == start.0 { start.1.min(chars.len()) } else { 0 };
            let to = if row == end.0 {
                // Release column is inclusive of the character under it.
                (end.1 + 1).min(chars.len())
            } else {
                chars.len()
            };
            if from < to {
                parts.push(chars[from..to].iter().collect::<String>());
            } else if row == start.0 && row == end.0 {
                return String::new();
            }
        }
        parts.join("\n")
    }

    // Scrolling ------------------------------------------------------

    pub fn scroll_down(&mut self, visible: usize) {
        let max = self.rows.len().saturating_sub(visible.max(1));
        if self.scroll < max {
            self.scroll += 1;
        }
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    pub fn page_down(&mut self, visible: usize) {
        let max = self.rows.len().saturating_sub(visible.max(1));
        self.scroll = (self.scroll + visible).min(max);
    }

    pub fn page_up(&mut self, visible: usize) {
        self.scroll = self.scroll.saturating_sub(visible);
    }

    pub fn go_top(&mut self) {
        self.scroll = 0;
    }

    pub fn go_bottom(&mut self, visible: usize) {
        self.scroll = self.rows.len().saturating_sub(visible.max(1));
    }
}

fn ordered(a: Cell, b: Cell) -> (Cell, Cell) {
    if b < a { (b, a) } else { (a, b) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kartei_core::TextLine;

    fn page(number: usize, lines: &[&str]) -> RenderedPage {
        RenderedPage {
            number,
            width: 100.0,
            height: 100.0,
            lines: lines
                .iter()
                .enumerate()
                .map(|(i, text)| TextLine {
                    text: text.to_string(),
                    x0: 0.0,
                    y0: i as f32 * 10.0,
                    x1: 90.0,
                    y1: i as f32 * 10.0 + 9.0,
                })
                .collect(),
        }
    }

    #[test]
    fn pages_stack_in_order_with_headers() {
        let mut view = PageViewState::default();
        view.push_page(&page(1, &["alpha"]));
        view.push_page(&page(2, &["beta"]));

        assert_eq!(view.pages_loaded, 2);
        assert_eq!(view.rows[0], ViewRow::PageHeader(1));
        assert_eq!(
            view.rows[1],
            ViewRow::Text {
                page: 1,
                line: "alpha".into()
            }
        );
        assert_eq!(view.rows[3], ViewRow::PageHeader(2));
    }

    #[test]
    fn single_row_selection_extracts_span() {
        let mut view = PageViewState::default();
        view.push_page(&page(1, &["hello world"]));

        view.begin_selection((1, 0));
        let text = view.complete_selection((1, 4));
        assert_eq!(text, "hello");
    }

    #[test]
    fn reversed_drag_is_normalized() {
        let mut view = PageViewState::default();
        view.push_page(&page(1, &["hello world"]));

        view.begin_selection((1, 10));
        let text = view.complete_selection((1, 6));
        assert_eq!(text, "world");
    }

    #[test]
    fn multi_row_selection_skips_non_text_rows() {
        let mut view = PageViewState::default();
        view.push_page(&page(1, &["first line", "second line"]));

        // Row 0 is the page header; selecting across it only picks text.
        view.begin_selection((0, 0));
        let text = view.complete_selection((2, 5));
        assert_eq!(text, "first line\nsecond");
    }

    #[test]
    fn selection_past_line_end_clamps() {
        let mut view = PageViewState::default();
        view.push_page(&page(1, &["short"]));

        view.begin_selection((1, 2));
        let text = view.complete_selection((1, 200));
        assert_eq!(text, "ort");
    }

    #[test]
    fn whitespace_selection_clears_highlight() {
        let mut view = PageViewState::default();
        view.push_page(&page(1, &["  x"]));

        view.begin_selection((1, 0));
        let text = view.complete_selection((1, 1));
        assert!(text.trim().is_empty());
        assert!(view.highlight.is_none());
    }
}
