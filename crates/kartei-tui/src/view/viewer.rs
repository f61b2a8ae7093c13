use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::App;

/// Render the main viewer screen: document list, page area, study panel,
/// the action bar, and the footer.
pub fn render_in(f: &mut Frame, app: &mut App, area: Rect) {
    let rows = Layout::vertical([
        Constraint::Min(5),
        Constraint::Length(4),
        Constraint::Length(1),
    ])
    .split(area);
    let body = rows[0];
    let action_area = rows[1];
    let footer_area = rows[2];

    let study_width = if body.width > 120 {
        40
    } else {
        (body.width / 3).max(24)
    };
    let columns = Layout::horizontal([
        Constraint::Length(28),
        Constraint::Min(40),
        Constraint::Length(study_width),
    ])
    .split(body);

    super::documents::render_in(f, app, columns[0]);
    super::pages::render_in(f, app, columns[1]);
    super::study::render_in(f, app, columns[2]);

    render_action_bar(f, app, action_area);
    render_footer(f, app, footer_area);
}

fn render_action_bar(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let selection_preview = if app.selection.is_empty() {
        Span::styled("(select text with the mouse)", Style::default().fg(theme.dim))
    } else {
        Span::styled(
            format!("\"{}\"", truncate(&app.selection, area.width.saturating_sub(20) as usize)),
            Style::default().fg(theme.text),
        )
    };

    let submit = if app.processing {
        Span::styled("[working…]", Style::default().fg(theme.dim))
    } else if app.process_enabled() {
        Span::styled(
            "[p: run]",
            Style::default().fg(theme.ok).add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled("[p: run]", Style::default().fg(theme.dim))
    };

    let lines = vec![
        Line::from(vec![
            Span::styled(" Selection ", theme.header_style()),
            Span::raw(" "),
            selection_preview,
        ]),
        Line::from(vec![
            Span::styled(" Action ", theme.header_style()),
            Span::raw(" "),
            Span::styled(
                app.action.label(),
                Style::default()
                    .fg(theme.active)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  (a: cycle)  ", Style::default().fg(theme.dim)),
            submit,
            Span::raw("  "),
            Span::styled("note: ", Style::default().fg(theme.dim)),
            Span::styled(
                if app.note.is_empty() {
                    "(n: add)".to_string()
                } else {
                    app.note.clone()
                },
                Style::default().fg(theme.text),
            ),
        ]),
        result_line(app, area.width),
    ];

    f.render_widget(Paragraph::new(lines), area);
}

fn result_line(app: &App, width: u16) -> Line<'static> {
    let theme = &app.theme;
    if app.result.is_empty() {
        return Line::from("");
    }
    Line::from(vec![
        Span::styled(" Result ", theme.header_style()),
        Span::raw(" "),
        Span::styled(
            truncate(&app.result, width.saturating_sub(12) as usize),
            Style::default().fg(theme.ok),
        ),
    ])
}

fn render_footer(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let hints = "j/k: move  Enter: open  Tab: focus  a: action  n: note  p: run  u: upload  r: reload  ?: help  q: quit";

    let line = if app.status.is_empty() {
        Line::from(Span::styled(hints, theme.footer_style()))
    } else {
        Line::from(vec![
            Span::styled(app.status.clone(), Style::default().fg(theme.text)),
            Span::styled(format!("  {hints}"), theme.footer_style()),
        ])
    };
    f.render_widget(Paragraph::new(line), area);
}

fn truncate(s: &str, max: usize) -> String {
    let flat = s.replace('\n', " ");
    if flat.chars().count() <= max {
        flat
    } else {
        let cut: String = flat.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}
