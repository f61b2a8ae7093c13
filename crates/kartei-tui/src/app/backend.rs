use tracing::debug;

use super::{App, Screen};
use crate::model::documents::EMPTY_PLACEHOLDER;
use crate::tui_event::{BackendCommand, BackendEvent};

impl App {
    /// Apply one backend event to the application state.
    pub fn handle_backend_event(&mut self, event: BackendEvent) {
        match event {
            BackendEvent::DocumentsLoaded { documents } => {
                self.documents.set_documents(documents);
                if self.documents.is_empty() {
                    self.current_document_id = None;
                    self.page_view.clear();
                    self.study.clear();
                    self.selection.clear();
                    self.status = EMPTY_PLACEHOLDER.to_string();
                } else {
                    // The first document opens automatically.
                    self.open_selected_document();
                }
            }
            BackendEvent::DocumentsFailed { error } => {
                self.status = format!("Could not load documents: {error}");
            }

            BackendEvent::DocumentOpened {
                generation,
                page_count,
            } => {
                if generation != self.load_generation {
                    debug!(generation, "discarding stale document open");
                    return;
                }
                self.page_view.page_count = page_count;
                self.status = format!("Rendering {page_count} page(s)…");
            }
            BackendEvent::PageRendered { generation, page } => {
                if generation != self.load_generation {
                    debug!(generation, page = page.number, "discarding stale page");
                    return;
                }
                self.page_view.push_page(&page);
                if self.page_view.pages_loaded == self.page_view.page_count {
                    self.status = format!("{} page(s) loaded", self.page_view.page_count);
                }
            }
            BackendEvent::DocumentFailed { generation, error } => {
                if generation != self.load_generation {
                    return;
                }
                self.status = format!("Could not load document: {error}");
            }

            BackendEvent::AnnotationsLoaded { document_id, items } => {
                if self.current_document_id.as_deref() == Some(document_id.as_str()) {
                    self.study.annotations = items;
                }
            }
            BackendEvent::FlashcardsLoaded { items } => {
                self.study.flashcards = items;
            }

            BackendEvent::ProcessFinished { outcome } => {
                self.processing = false;
                self.result = outcome.result;
                self.note.clear();
                self.status = "Done".to_string();
            }
            BackendEvent::ProcessFailed { error } => {
                self.processing = false;
                self.status = format!("Processing failed: {error}");
            }

            BackendEvent::UploadFinished => {
                self.settle_upload(false);
            }
            BackendEvent::UploadFailed { message } => {
                self.error_modal = Some(message);
                self.settle_upload(true);
            }
        }
    }

    /// Record one finished upload. The picker is cleared and the
    /// document list reloaded only once the whole batch has settled; a
    /// batch with any rejection keeps the picker selection for retry.
    fn settle_upload(&mut self, failed: bool) {
        self.pending_uploads = self.pending_uploads.saturating_sub(1);
        if failed {
            self.upload_failures += 1;
        }
        if self.pending_uploads > 0 {
            return;
        }

        let failures = std::mem::take(&mut self.upload_failures);
        if failures == 0 {
            self.file_picker.selected.clear();
            self.file_picker.refresh_entries();
            self.screen = Screen::Viewer;
            self.status = "Upload complete".to_string();
        } else {
            self.status = format!("{failures} upload(s) failed");
        }
        // Successful uploads changed the collection even when others in
        // the batch were rejected.
        self.send_command(BackendCommand::LoadDocuments);
    }
}
