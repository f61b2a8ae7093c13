use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use crate::app::{App, Focus};
use crate::model::documents::EMPTY_PLACEHOLDER;

/// Render the document list panel.
pub fn render_in(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let focused = app.focus == Focus::Documents;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if focused {
            Style::default().fg(theme.active)
        } else {
            theme.border_style()
        })
        .title(" Documents ");

    if app.documents.is_empty() {
        let placeholder = Paragraph::new(Line::from(Span::styled(
            EMPTY_PLACEHOLDER,
            Style::default().fg(theme.dim),
        )))
        .block(block);
        f.render_widget(placeholder, area);
        return;
    }

    let items: Vec<ListItem> = app
        .documents
        .entries
        .iter()
        .map(|doc| {
            let open = app.current_document_id.as_deref() == Some(doc.id.as_str());
            let style = if open {
                Style::default().fg(theme.active)
            } else {
                Style::default().fg(theme.text)
            };
            ListItem::new(Line::from(Span::styled(doc.name.clone(), style)))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(theme.highlight_style());

    let mut state = ListState::default();
    state.select(Some(app.documents.cursor));
    f.render_stateful_widget(list, area, &mut state);
}
