mod backend;
mod update;

use std::path::PathBuf;

use ratatui::layout::Rect;
use tokio::sync::mpsc;

use kartei_core::ProcessAction;

use crate::model::documents::DocumentListState;
use crate::model::pages::PageViewState;
use crate::model::study::StudyState;
use crate::theme::Theme;
use crate::tui_event::BackendCommand;

/// Which screen is currently displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Viewer,
    FilePicker,
}

/// Input mode determines how keyboard input is interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    NoteInput,
}

/// Which viewer panel has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Documents,
    Pages,
    Study,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Documents => Focus::Pages,
            Focus::Pages => Focus::Study,
            Focus::Study => Focus::Documents,
        }
    }
}

/// State for the file picker screen (PDF uploads).
#[derive(Debug, Clone)]
pub struct FilePickerState {
    /// Current directory being browsed.
    pub current_dir: PathBuf,
    /// Entries in the current directory (dirs first, then files).
    pub entries: Vec<FileEntry>,
    /// Cursor position in the entries list.
    pub cursor: usize,
    /// Selected PDF files for upload.
    pub selected: Vec<PathBuf>,
    /// Scroll offset for the entries list.
    pub scroll_offset: usize,
}

/// A single entry in the file picker.
#[derive(Debug, Clone)]
pub struct FileEntry {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
    pub is_pdf: bool,
}

impl FilePickerState {
    pub fn new() -> Self {
        let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let mut state = Self {
            current_dir,
            entries: Vec::new(),
            cursor: 0,
            selected: Vec::new(),
            scroll_offset: 0,
        };
        state.refresh_entries();
        state
    }

    /// Refresh the entries list from the current directory.
    pub fn refresh_entries(&mut self) {
        let mut entries = Vec::new();

        if let Some(parent) = self.current_dir.parent() {
            entries.push(FileEntry {
                name: "..".to_string(),
                path: parent.to_path_buf(),
                is_dir: true,
                is_pdf: false,
            });
        }

        if let Ok(read_dir) = std::fs::read_dir(&self.current_dir) {
            let mut dirs = Vec::new();
            let mut files = Vec::new();

            for entry in read_dir.flatten() {
                let path = entry.path();
                let name = entry.file_name().to_string_lossy().to_string();

                // Skip hidden files/dirs
                if name.starts_with('.') {
                    continue;
                }

                if path.is_dir() {
                    dirs.push(FileEntry {
                        name,
                        path,
                        is_dir: true,
                        is_pdf: false,
                    });
                } else {
                    let is_pdf = path
                        .extension()
                        .and_then(|e| e.to_str())
                        .map(|e| e.eq_ignore_ascii_case("pdf"))
                        .unwrap_or(false);
                    files.push(FileEntry {
                        name,
                        path,
                        is_dir: false,
                        is_pdf,
                    });
                }
            }

            dirs.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
            files.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));

            entries.extend(dirs);
            entries.extend(files);
        }

        self.entries = entries;
        self.cursor = 0;
        self.scroll_offset = 0;
    }

    /// Toggle selection of the PDF under the cursor.
    pub fn toggle_selected(&mut self) {
        if let Some(entry) = self.entries.get(self.cursor) {
            if !entry.is_pdf {
                return;
            }
            if let Some(pos) = self.selected.iter().position(|p| p == &entry.path) {
                self.selected.remove(pos);
            } else {
                self.selected.push(entry.path.clone());
            }
        }
    }

    /// Enter the directory at cursor, or return false if not a directory.
    pub fn enter_directory(&mut self) -> bool {
        if let Some(entry) = self.entries.get(self.cursor) {
            if entry.is_dir {
                self.current_dir = entry.path.clone();
                self.refresh_entries();
                return true;
            }
        }
        false
    }

    pub fn is_selected(&self, path: &PathBuf) -> bool {
        self.selected.contains(path)
    }
}

/// Main application state.
pub struct App {
    pub screen: Screen,
    pub input_mode: InputMode,
    pub focus: Focus,
    pub theme: Theme,
    pub tick: usize,
    pub should_quit: bool,
    pub confirm_quit: bool,
    pub show_help: bool,

    /// Id of the document currently open in the page area.
    pub current_document_id: Option<String>,
    pub documents: DocumentListState,
    pub page_view: PageViewState,
    pub study: StudyState,

    /// Current trimmed selection; empty means nothing selected.
    pub selection: String,
    /// Note typed for the next annotate request.
    pub note: String,
    /// Action armed for the next submit.
    pub action: ProcessAction,
    /// Latest processing result text.
    pub result: String,

    /// Transient message shown in the status bar.
    pub status: String,
    /// Blocking error dialog; set on upload rejection and similar faults.
    pub error_modal: Option<String>,
    /// True while a process request is in flight (submit is disabled).
    pub processing: bool,

    /// Monotonic counter identifying the latest document load. Events
    /// stamped with an older generation are discarded.
    pub load_generation: u64,
    /// Channel to send commands to the backend listener.
    pub backend_cmd_tx: Option<mpsc::UnboundedSender<BackendCommand>>,

    pub file_picker: FilePickerState,
    /// Uploads still in flight from the current picker batch.
    pub pending_uploads: usize,
    /// Rejections seen in the current batch; the picker selection is
    /// kept for retry until a batch settles with zero of these.
    pub upload_failures: usize,
    /// Last page area rendered (for mouse position → cell mapping).
    pub last_page_area: Option<Rect>,
    /// Height of the visible page area (set on render, used for paging).
    pub visible_rows: usize,
}

impl App {
    pub fn new(theme: Theme) -> Self {
        Self {
            screen: Screen::Viewer,
            input_mode: InputMode::Normal,
            focus: Focus::Documents,
            theme,
            tick: 0,
            should_quit: false,
            confirm_quit: false,
            show_help: false,
            current_document_id: None,
            documents: DocumentListState::default(),
            page_view: PageViewState::default(),
            study: StudyState::default(),
            selection: String::new(),
            note: String::new(),
            action: ProcessAction::Annotate,
            result: String::new(),
            status: String::new(),
            error_modal: None,
            processing: false,
            load_generation: 0,
            backend_cmd_tx: None,
            file_picker: FilePickerState::new(),
            pending_uploads: 0,
            upload_failures: 0,
            last_page_area: None,
            visible_rows: 20,
        }
    }

    /// Whether the submit control is currently usable.
    pub fn process_enabled(&self) -> bool {
        !self.selection.is_empty() && self.current_document_id.is_some() && !self.processing
    }

    pub(super) fn send_command(&self, cmd: BackendCommand) {
        if let Some(tx) = &self.backend_cmd_tx {
            let _ = tx.send(cmd);
        }
    }

    /// Open the document under the cursor: bump the load generation,
    /// wipe the per-document session state, and ask the backend for it.
    pub fn open_selected_document(&mut self) {
        let Some(doc) = self.documents.selected() else {
            return;
        };
        let id = doc.id.clone();
        let name = doc.name.clone();

        self.load_generation += 1;
        self.current_document_id = Some(id.clone());
        self.page_view.clear();
        self.study.clear();
        self.selection.clear();
        self.note.clear();
        self.result.clear();
        self.status = format!("Loading {name}…");

        self.send_command(BackendCommand::LoadDocument {
            id,
            generation: self.load_generation,
        });
    }

    // update() is in update.rs
    // handle_backend_event() is in backend.rs

    /// Render the current screen.
    pub fn view(&mut self, f: &mut ratatui::Frame) {
        let area = f.area();

        match self.screen {
            Screen::Viewer => crate::view::viewer::render_in(f, self, area),
            Screen::FilePicker => crate::view::file_picker::render_in(f, self, area),
        }

        if let Some(message) = self.error_modal.clone() {
            crate::view::error_modal::render(f, &self.theme, &message);
        }

        if self.show_help {
            crate::view::help::render(f, &self.theme);
        }

        if self.confirm_quit {
            crate::view::quit_confirm::render(f, &self.theme);
        }
    }
}

#[cfg(test)]
mod tests;
