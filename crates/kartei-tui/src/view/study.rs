use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::{App, Focus};

/// Render the study panel: annotations for the open document, then the
/// global flashcard list.
pub fn render_in(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let focused = app.focus == Focus::Study;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if focused {
            Style::default().fg(theme.active)
        } else {
            theme.border_style()
        })
        .title(" Study ");
    let inner = block.inner(area);

    let mut lines = Vec::new();
    lines.push(Line::from(Span::styled(
        format!("Annotations ({})", app.study.annotations.len()),
        Style::default()
            .fg(theme.active)
            .add_modifier(Modifier::BOLD),
    )));
    for ann in &app.study.annotations {
        lines.push(Line::from(vec![
            Span::styled(format!("p{} ", ann.page), Style::default().fg(theme.dim)),
            Span::styled(ann.text.clone(), Style::default().fg(theme.text)),
        ]));
        lines.push(Line::from(Span::styled(
            format!("   {}", ann.note),
            Style::default().fg(theme.ok),
        )));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(
        format!("Flashcards ({})", app.study.flashcards.len()),
        Style::default()
            .fg(theme.active)
            .add_modifier(Modifier::BOLD),
    )));
    for card in &app.study.flashcards {
        lines.push(Line::from(vec![
            Span::styled("Q: ", Style::default().fg(theme.dim)),
            Span::styled(card.front.clone(), Style::default().fg(theme.text)),
        ]));
        lines.push(Line::from(vec![
            Span::styled("A: ", Style::default().fg(theme.dim)),
            Span::styled(card.back.clone(), Style::default().fg(theme.text)),
        ]));
    }

    let visible: Vec<Line> = lines
        .into_iter()
        .skip(app.study.scroll)
        .take(inner.height as usize)
        .collect();

    f.render_widget(Paragraph::new(visible).block(block), area);
}
