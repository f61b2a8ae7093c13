//! Wire types shared between the controller and the study backend.

use serde::{Deserialize, Serialize};

/// An uploaded PDF the backend stores and serves by identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub name: String,
}

/// A saved (page, selected text, note) triple produced by a processing
/// request that carried a note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    pub page: u32,
    pub text: String,
    pub note: String,
}

/// A question/answer pair produced by a processing request with the
/// flashcard action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    pub front: String,
    pub back: String,
}

/// The backend operation to run on a text selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessAction {
    Annotate,
    Flashcard,
    Translate,
    Explain,
}

impl ProcessAction {
    /// All actions, in the order the UI cycles through them.
    pub fn all() -> [ProcessAction; 4] {
        [
            ProcessAction::Annotate,
            ProcessAction::Flashcard,
            ProcessAction::Translate,
            ProcessAction::Explain,
        ]
    }

    /// The wire value sent in the `action` form field.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessAction::Annotate => "annotate",
            ProcessAction::Flashcard => "flashcard",
            ProcessAction::Translate => "translate",
            ProcessAction::Explain => "explain",
        }
    }

    /// Display label for the action selector.
    pub fn label(&self) -> &'static str {
        match self {
            ProcessAction::Annotate => "Annotate",
            ProcessAction::Flashcard => "Flashcard",
            ProcessAction::Translate => "Translate",
            ProcessAction::Explain => "Explain",
        }
    }

    pub fn next(&self) -> ProcessAction {
        let all = Self::all();
        let idx = all.iter().position(|a| a == self).unwrap_or(0);
        all[(idx + 1) % all.len()]
    }
}

/// One processing request: document, action, selected text, optional note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessRequest {
    pub document_id: String,
    pub action: ProcessAction,
    pub text: String,
    pub note: Option<String>,
}

/// Result payload of a processing request. The backend may attach more
/// fields (echoed action, flashcard id); only `result` is displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessOutcome {
    pub result: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_cycle_covers_all_variants_and_wraps() {
        let mut action = ProcessAction::Annotate;
        let mut seen = Vec::new();
        for _ in 0..ProcessAction::all().len() {
            seen.push(action);
            action = action.next();
        }
        assert_eq!(seen, ProcessAction::all());
        assert_eq!(action, ProcessAction::Annotate);
    }

    #[test]
    fn action_wire_values_match_backend() {
        assert_eq!(ProcessAction::Annotate.as_str(), "annotate");
        assert_eq!(ProcessAction::Flashcard.as_str(), "flashcard");
        assert_eq!(ProcessAction::Translate.as_str(), "translate");
        assert_eq!(ProcessAction::Explain.as_str(), "explain");
    }

    #[test]
    fn document_list_decodes_backend_payload() {
        let body = r#"[{"id":"abc","name":"lecture.pdf"},{"id":"def","name":"notes.pdf"}]"#;
        let docs: Vec<Document> = serde_json::from_str(body).unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].id, "abc");
        assert_eq!(docs[1].name, "notes.pdf");
    }

    #[test]
    fn annotation_decodes_backend_payload() {
        let body = r#"{"page":3,"text":"selected","note":"remember this"}"#;
        let ann: Annotation = serde_json::from_str(body).unwrap();
        assert_eq!(ann.page, 3);
        assert_eq!(ann.note, "remember this");
    }
}
