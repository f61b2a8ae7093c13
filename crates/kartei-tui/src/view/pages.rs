use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::{App, Focus};
use crate::model::pages::ViewRow;

/// Render the page area: stacked page text with the current selection
/// highlighted. Records the inner area for mouse cell mapping.
pub fn render_in(f: &mut Frame, app: &mut App, area: Rect) {
    let theme = &app.theme;
    let focused = app.focus == Focus::Pages;

    let title = match app.page_view.page_count {
        0 => " Pages ".to_string(),
        total => format!(" Pages {}/{} ", app.page_view.pages_loaded, total),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if focused {
            Style::default().fg(theme.active)
        } else {
            theme.border_style()
        })
        .title(title);

    let inner = block.inner(area);
    app.last_page_area = Some(inner);
    app.visible_rows = inner.height as usize;

    let mut lines = Vec::with_capacity(inner.height as usize);
    let from = app.page_view.scroll;
    let to = (from + inner.height as usize).min(app.page_view.rows.len());
    for row in from..to {
        lines.push(render_row(app, row, inner.width as usize));
    }

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_row(app: &App, row: usize, width: usize) -> Line<'static> {
    let theme = &app.theme;
    match &app.page_view.rows[row] {
        ViewRow::PageHeader(number) => {
            let label = format!("── Page {number} ");
            let pad = "─".repeat(width.saturating_sub(label.chars().count()));
            Line::from(Span::styled(
                format!("{label}{pad}"),
                Style::default().fg(theme.dim).add_modifier(Modifier::BOLD),
            ))
        }
        ViewRow::Blank => Line::from(""),
        ViewRow::Text { line, .. } => {
            let Some(span) = row_highlight(app, row, line.chars().count()) else {
                return Line::from(Span::styled(
                    line.clone(),
                    Style::default().fg(theme.text),
                ));
            };
            let chars: Vec<char> = line.chars().collect();
            let (from, to) = span;
            let pre: String = chars[..from].iter().collect();
            let sel: String = chars[from..to].iter().collect();
            let post: String = chars[to..].iter().collect();
            Line::from(vec![
                Span::styled(pre, Style::default().fg(theme.text)),
                Span::styled(sel, theme.selection_style()),
                Span::styled(post, Style::default().fg(theme.text)),
            ])
        }
    }
}

/// Column range of the highlight on `row`, if the row is inside the
/// current selection span.
fn row_highlight(app: &App, row: usize, len: usize) -> Option<(usize, usize)> {
    let (start, end) = app.page_view.highlight?;
    if row < start.0 || row > end.0 {
        return None;
    }
    let from = if row == start.0 { start.1.min(len) } else { 0 };
    let to = if row == end.0 {
        (end.1 + 1).min(len)
    } else {
        len
    };
    (from < to).then_some((from, to))
}
