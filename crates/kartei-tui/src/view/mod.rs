pub mod documents;
pub mod error_modal;
pub mod file_picker;
pub mod help;
pub mod pages;
pub mod quit_confirm;
pub mod study;
pub mod viewer;

use ratatui::layout::{Constraint, Flex, Layout, Rect};

/// Create a centered rectangle of the given width (columns) and height (rows).
pub(crate) fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .split(area);
    Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .split(vertical[0])[0]
}
