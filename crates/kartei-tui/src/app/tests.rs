use super::*;
use crate::action::Action;
use crate::model::documents::EMPTY_PLACEHOLDER;
use crate::tui_event::BackendEvent;
use kartei_core::{Annotation, Document, Flashcard, ProcessOutcome, RenderedPage, TextLine};
use ratatui::layout::Rect;

/// Create a minimal App wired to a command channel we can inspect.
fn test_app() -> (App, mpsc::UnboundedReceiver<BackendCommand>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let mut app = App::new(Theme::hacker());
    app.backend_cmd_tx = Some(tx);
    (app, rx)
}

fn doc(id: &str, name: &str) -> Document {
    Document {
        id: id.to_string(),
        name: name.to_string(),
    }
}

fn rendered_page(number: usize, lines: &[&str]) -> RenderedPage {
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

/// Load a two-line single-page document into the app, consuming the
/// LoadDocument command it triggers.
fn load_one_document(app: &mut App, rx: &mut mpsc::UnboundedReceiver<BackendCommand>) {
    app.handle_backend_event(BackendEvent::DocumentsLoaded {
        documents: vec![doc("d1", "paper.pdf")],
    });
    assert!(matches!(
        rx.try_recv(),
        Ok(BackendCommand::LoadDocument { .. })
    ));
    let generation = app.load_generation;
    app.handle_backend_event(BackendEvent::DocumentOpened {
        generation,
        page_count: 1,
    });
    app.handle_backend_event(BackendEvent::PageRendered {
        generation,
        page: rendered_page(1, &["hello world", "second line"]),
    });
    // Page area at origin so mouse coordinates map 1:1 to cells.
    app.last_page_area = Some(Rect::new(0, 0, 80, 24));
}

// ── Empty document list ─────────────────────────────────────────

#[test]
fn empty_document_list_shows_placeholder_and_disables_processing() {
    let (mut app, _rx) = test_app();

    app.handle_backend_event(BackendEvent::DocumentsLoaded { documents: vec![] });

    assert!(app.documents.is_empty());
    assert_eq!(app.status, EMPTY_PLACEHOLDER);
    assert!(app.current_document_id.is_none());
    assert!(!app.process_enabled());
}

// ── Auto-select first document ──────────────────────────────────

#[test]
fn loaded_documents_auto_open_the_first() {
    let (mut app, mut rx) = test_app();

    app.handle_backend_event(BackendEvent::DocumentsLoaded {
        documents: vec![doc("d1", "a.pdf"), doc("d2", "b.pdf")],
    });

    assert_eq!(app.documents.cursor, 0);
    assert_eq!(app.current_document_id.as_deref(), Some("d1"));
    match rx.try_recv().unwrap() {
        BackendCommand::LoadDocument { id, generation } => {
            assert_eq!(id, "d1");
            assert_eq!(generation, app.load_generation);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn pages_accumulate_in_render_order() {
    let (mut app, mut rx) = test_app();
    app.handle_backend_event(BackendEvent::DocumentsLoaded {
        documents: vec![doc("d1", "a.pdf")],
    });
    let _ = rx.try_recv();
    let generation = app.load_generation;

    app.handle_backend_event(BackendEvent::DocumentOpened {
        generation,
        page_count: 2,
    });
    app.handle_backend_event(BackendEvent::PageRendered {
        generation,
        page: rendered_page(1, &["one"]),
    });
    app.handle_backend_event(BackendEvent::PageRendered {
        generation,
        page: rendered_page(2, &["two"]),
    });

    assert_eq!(app.page_view.pages_loaded, 2);
    assert_eq!(app.page_view.page_of_row(1), Some(1));
    assert_eq!(app.page_view.page_of_row(4), Some(2));
}

// ── Selection capture ───────────────────────────────────────────

#[test]
fn mouse_selection_enables_processing_with_trimmed_text() {
    let (mut app, mut rx) = test_app();
    load_one_document(&mut app, &mut rx);

    // Row 1 is "hello world"; drag over "hello " including the space.
    app.update(Action::PressAt(0, 1));
    app.update(Action::DragAt(3, 1));
    app.update(Action::ReleaseAt(5, 1));

    assert_eq!(app.selection, "hello");
    assert!(app.process_enabled());
    assert!(app.page_view.highlight.is_some());
}

#[test]
fn whitespace_selection_disables_processing() {
    let (mut app, mut rx) = test_app();
    load_one_document(&mut app, &mut rx);
    app.update(Action::PressAt(0, 1));
    app.update(Action::ReleaseAt(4, 1));
    assert!(app.process_enabled());

    // Row 0 is the page header, not selectable text.
    app.update(Action::PressAt(0, 0));
    app.update(Action::ReleaseAt(5, 0));

    assert!(app.selection.is_empty());
    assert!(!app.process_enabled());
    assert!(app.page_view.highlight.is_none());
}

// ── Submit guard ────────────────────────────────────────────────

#[test]
fn submit_without_selection_sends_nothing() {
    let (mut app, mut rx) = test_app();
    load_one_document(&mut app, &mut rx);

    app.update(Action::Submit);

    assert!(rx.try_recv().is_err());
    assert!(!app.processing);
}

#[test]
fn submit_sends_process_request_with_note_for_annotate() {
    let (mut app, mut rx) = test_app();
    load_one_document(&mut app, &mut rx);
    app.update(Action::PressAt(0, 1));
    app.update(Action::ReleaseAt(10, 1));
    assert_eq!(app.selection, "hello world");

    app.update(Action::EditNote);
    for c in "key point".chars() {
        app.update(Action::NoteInput(c));
    }
    app.update(Action::NoteConfirm);
    app.update(Action::Submit);

    match rx.try_recv().unwrap() {
        BackendCommand::Process { request } => {
            assert_eq!(request.document_id, "d1");
            assert_eq!(request.action, ProcessAction::Annotate);
            assert_eq!(request.text, "hello world");
            assert_eq!(request.note.as_deref(), Some("key point"));
        }
        other => panic!("unexpected command: {other:?}"),
    }
    assert!(app.processing);
    assert!(!app.process_enabled());
}

#[test]
fn submit_sends_note_with_any_action() {
    let (mut app, mut rx) = test_app();
    load_one_document(&mut app, &mut rx);
    app.update(Action::PressAt(0, 1));
    app.update(Action::ReleaseAt(4, 1));
    app.note = "  remember this  ".to_string();

    // The backend stores a note as an annotation no matter which
    // action produced it, so the note rides along for flashcards too.
    app.update(Action::CycleAction); // annotate → flashcard
    app.update(Action::Submit);

    match rx.try_recv().unwrap() {
        BackendCommand::Process { request } => {
            assert_eq!(request.action, ProcessAction::Flashcard);
            assert_eq!(request.note.as_deref(), Some("remember this"));
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn submit_without_document_sends_nothing() {
    let (mut app, mut rx) = test_app();
    app.handle_backend_event(BackendEvent::DocumentsLoaded { documents: vec![] });
    app.selection = "orphan selection".to_string();

    app.update(Action::Submit);

    assert!(rx.try_recv().is_err());
    assert!(!app.processing);
}

// ── Process results ─────────────────────────────────────────────

#[test]
fn process_finished_shows_result_and_clears_note() {
    let (mut app, mut rx) = test_app();
    load_one_document(&mut app, &mut rx);
    app.note = "a note".to_string();
    app.processing = true;

    app.handle_backend_event(BackendEvent::ProcessFinished {
        outcome: ProcessOutcome {
            result: "Annotation saved".to_string(),
        },
    });

    assert_eq!(app.result, "Annotation saved");
    assert!(app.note.is_empty());
    assert!(!app.processing);
}

#[test]
fn process_failure_reports_in_status_line() {
    let (mut app, mut rx) = test_app();
    load_one_document(&mut app, &mut rx);
    app.processing = true;

    app.handle_backend_event(BackendEvent::ProcessFailed {
        error: "server error (status 500)".to_string(),
    });

    assert!(!app.processing);
    assert!(app.status.contains("server error"));
    assert!(app.error_modal.is_none());
}

#[test]
fn study_lists_refresh_for_current_document_only() {
    let (mut app, mut rx) = test_app();
    load_one_document(&mut app, &mut rx);

    app.handle_backend_event(BackendEvent::AnnotationsLoaded {
        document_id: "other".to_string(),
        items: vec![Annotation {
            page: 1,
            text: "x".into(),
            note: "y".into(),
        }],
    });
    assert!(app.study.annotations.is_empty());

    app.handle_backend_event(BackendEvent::AnnotationsLoaded {
        document_id: "d1".to_string(),
        items: vec![Annotation {
            page: 1,
            text: "x".into(),
            note: "y".into(),
        }],
    });
    app.handle_backend_event(BackendEvent::FlashcardsLoaded {
        items: vec![Flashcard {
            front: "q".into(),
            back: "a".into(),
        }],
    });

    assert_eq!(app.study.annotations.len(), 1);
    assert_eq!(app.study.flashcards.len(), 1);
}

// ── Upload flow ─────────────────────────────────────────────────

#[test]
fn upload_failure_opens_error_modal_and_keeps_picker_selection() {
    let (mut app, _rx) = test_app();
    app.screen = Screen::FilePicker;
    app.file_picker.selected = vec![PathBuf::from("/tmp/bad.pdf")];
    app.pending_uploads = 1;

    app.handle_backend_event(BackendEvent::UploadFailed {
        message: "bad file".to_string(),
    });

    assert_eq!(app.error_modal.as_deref(), Some("bad file"));
    assert_eq!(app.screen, Screen::FilePicker);
    assert_eq!(app.file_picker.selected.len(), 1);

    // Dismissing the modal requires an explicit key.
    app.update(Action::MoveDown);
    assert!(app.error_modal.is_some());
    app.update(Action::DrillIn);
    assert!(app.error_modal.is_none());
}

#[test]
fn upload_success_returns_to_viewer_and_reloads_documents() {
    let (mut app, mut rx) = test_app();
    app.screen = Screen::FilePicker;
    app.file_picker.selected = vec![PathBuf::from("/tmp/good.pdf")];
    app.pending_uploads = 1;

    app.handle_backend_event(BackendEvent::UploadFinished);

    assert_eq!(app.screen, Screen::Viewer);
    assert!(app.file_picker.selected.is_empty());
    assert!(matches!(rx.try_recv(), Ok(BackendCommand::LoadDocuments)));

    // The fresh list auto-selects its first entry.
    app.handle_backend_event(BackendEvent::DocumentsLoaded {
        documents: vec![doc("d1", "a.pdf"), doc("d2", "b.pdf"), doc("d3", "c.pdf")],
    });
    assert_eq!(app.documents.cursor, 0);
    assert_eq!(app.current_document_id.as_deref(), Some("d1"));
}

#[test]
fn upload_batch_settles_once_and_keeps_selection_on_partial_failure() {
    let (mut app, mut rx) = test_app();
    app.screen = Screen::FilePicker;
    app.file_picker.selected = vec![PathBuf::from("/tmp/a.pdf"), PathBuf::from("/tmp/b.pdf")];
    app.pending_uploads = 2;

    // First success does not yet clear the batch or reload.
    app.handle_backend_event(BackendEvent::UploadFinished);
    assert_eq!(app.file_picker.selected.len(), 2);
    assert_eq!(app.screen, Screen::FilePicker);
    assert!(rx.try_recv().is_err());

    // Second file rejected: batch settles, selection kept for retry,
    // and the list reloads exactly once for the upload that landed.
    app.handle_backend_event(BackendEvent::UploadFailed {
        message: "bad file".to_string(),
    });
    assert_eq!(app.error_modal.as_deref(), Some("bad file"));
    assert_eq!(app.file_picker.selected.len(), 2);
    assert_eq!(app.screen, Screen::FilePicker);
    assert!(matches!(rx.try_recv(), Ok(BackendCommand::LoadDocuments)));
    assert!(rx.try_recv().is_err());
}

// ── Stale load generations ──────────────────────────────────────

#[test]
fn stale_generation_events_are_discarded() {
    let (mut app, mut rx) = test_app();
    app.handle_backend_event(BackendEvent::DocumentsLoaded {
        documents: vec![doc("d1", "a.pdf"), doc("d2", "b.pdf")],
    });
    let _ = rx.try_recv();
    let old_generation = app.load_generation;

    // Switch to the second document before the first finishes loading.
    app.update(Action::MoveDown);
    app.update(Action::DrillIn);
    assert_eq!(app.current_document_id.as_deref(), Some("d2"));
    assert!(app.load_generation > old_generation);

    app.handle_backend_event(BackendEvent::DocumentOpened {
        generation: old_generation,
        page_count: 9,
    });
    app.handle_backend_event(BackendEvent::PageRendered {
        generation: old_generation,
        page: rendered_page(1, &["stale"]),
    });

    assert_eq!(app.page_view.page_count, 0);
    assert_eq!(app.page_view.pages_loaded, 0);
    assert!(app.page_view.rows.is_empty());
}

// ── Document switch resets session state ────────────────────────

#[test]
fn opening_a_document_resets_selection_note_and_result() {
    let (mut app, mut rx) = test_app();
    app.handle_backend_event(BackendEvent::DocumentsLoaded {
        documents: vec![doc("d1", "a.pdf"), doc("d2", "b.pdf")],
    });
    let _ = rx.try_recv();
    app.selection = "carried over".to_string();
    app.note = "old note".to_string();
    app.result = "old result".to_string();

    app.update(Action::MoveDown);
    app.update(Action::DrillIn);

    assert!(app.selection.is_empty());
    assert!(app.note.is_empty());
    assert!(app.result.is_empty());
    match rx.try_recv().unwrap() {
        BackendCommand::LoadDocument { id, .. } => assert_eq!(id, "d2"),
        other => panic!("unexpected command: {other:?}"),
    }
}

// ── Quit confirm ────────────────────────────────────────────────

#[test]
fn ctrl_c_reaches_quit_confirm_while_typing_a_note() {
    let (mut app, mut rx) = test_app();
    load_one_document(&mut app, &mut rx);
    app.update(Action::EditNote);
    app.update(Action::NoteInput('x'));

    app.update(Action::Quit);

    assert_eq!(app.input_mode, InputMode::Normal);
    assert!(app.confirm_quit);
}

#[test]
fn quit_asks_for_confirmation() {
    let (mut app, _rx) = test_app();

    app.update(Action::Quit);
    assert!(app.confirm_quit);
    assert!(!app.should_quit);

    app.update(Action::NavigateBack);
    assert!(!app.confirm_quit);

    app.update(Action::Quit);
    app.update(Action::Quit);
    assert!(app.should_quit);
}
