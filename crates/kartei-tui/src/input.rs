use ratatui::crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::action::Action;
use crate::app::InputMode;

/// Map a crossterm terminal event to an action, respecting input mode.
pub fn map_event(event: &Event, input_mode: &InputMode) -> Action {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            // Ctrl+C always quits regardless of mode
            if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                return Action::Quit;
            }

            match input_mode {
                InputMode::Normal => map_key_normal(key),
                InputMode::NoteInput => map_key_note(key),
            }
        }
        Event::Mouse(mouse) => map_mouse(mouse),
        Event::Resize(w, h) => Action::Resize(*w, *h),
        _ => Action::None,
    }
}

fn map_mouse(mouse: &MouseEvent) -> Action {
    match mouse.kind {
        MouseEventKind::ScrollDown => Action::MoveDown,
        MouseEventKind::ScrollUp => Action::MoveUp,
        MouseEventKind::Down(MouseButton::Left) => Action::PressAt(mouse.column, mouse.row),
        MouseEventKind::Drag(MouseButton::Left) => Action::DragAt(mouse.column, mouse.row),
        MouseEventKind::Up(MouseButton::Left) => Action::ReleaseAt(mouse.column, mouse.row),
        _ => Action::None,
    }
}

fn map_key_normal(key: &KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('j') | KeyCode::Down => Action::MoveDown,
        KeyCode::Char('k') | KeyCode::Up => Action::MoveUp,
        KeyCode::Enter => Action::DrillIn,
        KeyCode::Esc => Action::NavigateBack,
        KeyCode::Tab => Action::CycleFocus,
        KeyCode::Char('g') => Action::GoTop,
        KeyCode::Char('G') => Action::GoBottom,
        KeyCode::Char('a') => Action::CycleAction,
        KeyCode::Char('p') => Action::Submit,
        KeyCode::Char('n') => Action::EditNote,
        KeyCode::Char('r') => Action::ReloadDocuments,
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::PageDown,
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::PageUp,
        KeyCode::Char('u') | KeyCode::Char('o') => Action::AddFiles,
        KeyCode::Char(' ') => Action::ToggleSelect,
        KeyCode::Char('?') => Action::ToggleHelp,
        KeyCode::PageDown => Action::PageDown,
        KeyCode::PageUp => Action::PageUp,
        KeyCode::Home => Action::GoTop,
        KeyCode::End => Action::GoBottom,
        _ => Action::None,
    }
}

fn map_key_note(key: &KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc => Action::NoteCancel,
        KeyCode::Enter => Action::NoteConfirm,
        KeyCode::Char(c) => Action::NoteInput(c),
        KeyCode::Backspace => Action::NoteInput('\x08'), // sentinel for backspace
        _ => Action::None,
    }
}
