use kartei_core::ProcessRequest;

use super::{App, Focus, InputMode, Screen};
use crate::action::Action;
use crate::model::pages::Cell;
use crate::tui_event::BackendCommand;

impl App {
    /// Apply one action to the application state.
    pub fn update(&mut self, action: Action) {
        if action == Action::Tick {
            self.tick = self.tick.wrapping_add(1);
            return;
        }

        // The error dialog blocks everything until dismissed.
        if self.error_modal.is_some() {
            match action {
                Action::Quit => self.should_quit = true,
                Action::DrillIn | Action::NavigateBack => self.error_modal = None,
                _ => {}
            }
            return;
        }

        if self.confirm_quit {
            match action {
                Action::Quit | Action::DrillIn => self.should_quit = true,
                Action::NavigateBack => self.confirm_quit = false,
                _ => {}
            }
            return;
        }

        if self.show_help {
            match action {
                Action::ToggleHelp | Action::NavigateBack | Action::Quit => self.show_help = false,
                _ => {}
            }
            return;
        }

        if self.input_mode == InputMode::NoteInput {
            match action {
                Action::NoteInput('\x08') => {
                    self.note.pop();
                }
                Action::NoteInput(c) => self.note.push(c),
                Action::NoteConfirm | Action::NoteCancel => {
                    self.input_mode = InputMode::Normal;
                }
                // Ctrl+C still works while typing.
                Action::Quit => {
                    self.input_mode = InputMode::Normal;
                    self.confirm_quit = true;
                }
                _ => {}
            }
            return;
        }

        match self.screen {
            Screen::Viewer => self.update_viewer(action),
            Screen::FilePicker => self.update_file_picker(action),
        }
    }

    fn update_viewer(&mut self, action: Action) {
        match action {
            Action::Quit => self.confirm_quit = true,
            Action::Resize(_, h) => {
                self.visible_rows = h.saturating_sub(4) as usize;
            }
            Action::ToggleHelp => self.show_help = true,
            Action::CycleFocus => self.focus = self.focus.next(),

            Action::MoveDown => match self.focus {
                Focus::Documents => self.documents.move_down(),
                Focus::Pages => self.page_view.scroll_down(self.visible_rows),
                Focus::Study => self.study.scroll_down(self.visible_rows),
            },
            Action::MoveUp => match self.focus {
                Focus::Documents => self.documents.move_up(),
                Focus::Pages => self.page_view.scroll_up(),
                Focus::Study => self.study.scroll_up(),
            },
            Action::PageDown => self.page_view.page_down(self.visible_rows),
            Action::PageUp => self.page_view.page_up(self.visible_rows),
            Action::GoTop => self.page_view.go_top(),
            Action::GoBottom => self.page_view.go_bottom(self.visible_rows),

            Action::DrillIn => {
                if self.focus == Focus::Documents {
                    self.open_selected_document();
                }
            }
            Action::NavigateBack => {
                self.page_view.clear_selection();
                self.selection.clear();
            }

            Action::CycleAction => {
                self.action = self.action.next();
            }
            Action::EditNote => {
                self.input_mode = InputMode::NoteInput;
            }
            Action::Submit => self.submit(),
            Action::ReloadDocuments => {
                self.status = "Reloading documents…".to_string();
                self.send_command(BackendCommand::LoadDocuments);
            }
            Action::AddFiles => {
                self.file_picker.refresh_entries();
                self.screen = Screen::FilePicker;
            }

            Action::PressAt(x, y) => {
                if let Some(cell) = self.cell_at(x, y) {
                    self.page_view.begin_selection(cell);
                }
            }
            Action::DragAt(x, y) => {
                if let Some(cell) = self.cell_at(x, y) {
                    self.page_view.drag_selection(cell);
                }
            }
            Action::ReleaseAt(x, y) => {
                let cell = self.cell_at(x, y);
                self.complete_selection(cell);
            }

            _ => {}
        }
    }

    fn update_file_picker(&mut self, action: Action) {
        match action {
            Action::Quit | Action::NavigateBack => {
                self.screen = Screen::Viewer;
            }
            Action::MoveDown => {
                if self.file_picker.cursor + 1 < self.file_picker.entries.len() {
                    self.file_picker.cursor += 1;
                }
            }
            Action::MoveUp => {
                self.file_picker.cursor = self.file_picker.cursor.saturating_sub(1);
            }
            Action::GoTop => self.file_picker.cursor = 0,
            Action::GoBottom => {
                self.file_picker.cursor = self.file_picker.entries.len().saturating_sub(1);
            }
            Action::ToggleSelect => self.file_picker.toggle_selected(),
            Action::DrillIn => {
                if !self.file_picker.enter_directory() {
                    self.file_picker.toggle_selected();
                }
            }
            // 'u' confirms the upload of everything selected.
            Action::AddFiles | Action::Submit => self.upload_selected_files(),
            Action::ToggleHelp => self.show_help = true,
            _ => {}
        }
    }

    /// Send an upload command for every selected PDF. The picker keeps
    /// its selection until the backend confirms, so a rejected file can
    /// be retried without re-picking it.
    fn upload_selected_files(&mut self) {
        if self.file_picker.selected.is_empty() {
            self.status = "No files selected".to_string();
            return;
        }
        self.pending_uploads = self.file_picker.selected.len();
        self.upload_failures = 0;
        self.status = format!("Uploading {} file(s)…", self.pending_uploads);
        for path in self.file_picker.selected.clone() {
            self.send_command(BackendCommand::Upload { path });
        }
    }

    fn submit(&mut self) {
        if !self.process_enabled() {
            return;
        }
        let Some(document_id) = self.current_document_id.clone() else {
            return;
        };

        // A non-empty note rides along for every action; the backend
        // turns it into an annotation in addition to the action's own
        // output.
        let note = match self.note.trim() {
            "" => None,
            trimmed => Some(trimmed.to_string()),
        };
        let request = ProcessRequest {
            document_id,
            action: self.action,
            text: self.selection.clone(),
            note,
        };

        self.processing = true;
        self.status = format!("Running {}…", self.action.label());
        self.send_command(BackendCommand::Process { request });
    }

    /// Map a screen position to a page-area cell, if it falls inside the
    /// last rendered page area.
    fn cell_at(&self, x: u16, y: u16) -> Option<Cell> {
        let area = self.last_page_area?;
        if x < area.x || x >= area.x + area.width || y < area.y || y >= area.y + area.height {
            return None;
        }
        let row = self.page_view.scroll + (y - area.y) as usize;
        let col = (x - area.x) as usize;
        Some((row, col))
    }

    /// Finish a mouse selection. A release outside the page area ends
    /// the drag at its last known extent; whitespace-only captures clear
    /// the selection entirely.
    fn complete_selection(&mut self, cell: Option<Cell>) {
        let Some(cell) = cell else {
            self.page_view.clear_selection();
            self.selection.clear();
            return;
        };
        let text = self.page_view.complete_selection(cell);
        let trimmed = text.trim();
        if trimmed.is_empty() {
            self.selection.clear();
        } else {
            self.selection = trimmed.to_string();
            self.focus = Focus::Pages;
        }
    }
}
