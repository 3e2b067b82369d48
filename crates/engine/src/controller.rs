//! The edit session controller.
//!
//! One [`CellEditor`] is bound to one cell editor instance. The host drives
//! it through a fixed sequence:
//!
//! 1. `activate` with the cell's value and the key that started the edit
//! 2. `is_cancel_before_start`, and if true abort without showing anything
//! 3. `on_shown` once the input is visible, then run the returned task on
//!    the next scheduling turn
//! 4. `classify_key` for every keystroke, `set_text` whenever the input changes
//! 5. `end_edit` (or `value` + `is_cancel_after_end`) when committing,
//!    `discard` when the grid cancelled the edit

use std::fmt::Display;

use serde::Serialize;

use crate::classify::{classify_key, KeyAction};
use crate::deferred::FocusTask;
use crate::error::EditorError;
use crate::key::Key;
use crate::policy::EditorPolicy;
use crate::session::{EditParams, EditSession};
use crate::value::CellInput;

/// What the host gets back when an edit ends.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EditOutcome<T> {
    /// The final typed value (`None` for cleared, unparsable or out-of-range input).
    pub value: Option<T>,
    /// The edit resolves to the same value the cell started with.
    pub cancel_after_end: bool,
}

/// The host-facing editor contract.
pub trait GridCellEditor {
    type Value;

    fn is_active(&self) -> bool;

    fn classify_key(&self, key: &Key) -> Result<KeyAction, EditorError>;

    fn is_cancel_before_start(&self) -> bool;

    fn on_shown(&mut self) -> Result<FocusTask, EditorError>;

    /// Current input text.
    fn text(&self) -> String;

    /// Host reports the input's text after a change.
    fn set_text(&mut self, text: &str) -> Result<(), EditorError>;

    fn value(&self) -> Option<Self::Value>;

    fn is_cancel_after_end(&self) -> bool;

    fn end_edit(&mut self) -> Result<EditOutcome<Self::Value>, EditorError>;

    fn discard(&mut self);
}

/// Generic cell editor: lifecycle and keystroke filtering driven by an
/// [`EditorPolicy`].
#[derive(Debug)]
pub struct CellEditor<T> {
    session: Option<EditSession<T>>,
}

impl<T> Default for CellEditor<T> {
    fn default() -> Self {
        Self { session: None }
    }
}

impl<T: Clone + Display> CellEditor<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a session, replacing any previous one.
    pub fn activate(&mut self, policy: EditorPolicy<T>, params: EditParams<T>) {
        if self.session.is_some() {
            log::debug!("replacing live edit session");
        }
        let session = EditSession::start(policy, params);
        log::debug!(
            "edit session started (by_typing={}, cancel_before_start={})",
            session.started_by_typing,
            session.cancel_before_start
        );
        self.session = Some(session);
    }

    pub fn session(&self) -> Option<&EditSession<T>> {
        self.session.as_ref()
    }

    fn live(&self) -> Result<&EditSession<T>, EditorError> {
        self.session.as_ref().ok_or(EditorError::NoActiveSession)
    }

    fn live_mut(&mut self) -> Result<&mut EditSession<T>, EditorError> {
        self.session.as_mut().ok_or(EditorError::NoActiveSession)
    }

    pub fn raw_value(&self) -> Option<&CellInput<T>> {
        self.session.as_ref().map(|s| &s.raw)
    }

    pub fn started_by_typing(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.started_by_typing)
    }
}

impl<T: Clone + Display> GridCellEditor for CellEditor<T> {
    type Value = T;

    fn is_active(&self) -> bool {
        self.session.is_some()
    }

    fn classify_key(&self, key: &Key) -> Result<KeyAction, EditorError> {
        let session = self.live()?;
        Ok(classify_key(&session.policy, key))
    }

    fn is_cancel_before_start(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.cancel_before_start)
    }

    fn on_shown(&mut self) -> Result<FocusTask, EditorError> {
        let session = self.live_mut()?;
        if session.cancel_before_start {
            return Err(EditorError::CancelledBeforeStart);
        }
        if session.shown {
            return Err(EditorError::AlreadyShown);
        }
        session.shown = true;
        // Typing continues at the caret; otherwise the next key replaces everything
        Ok(FocusTask::new(!session.started_by_typing))
    }

    fn text(&self) -> String {
        self.session.as_ref().map(|s| s.raw.display_text()).unwrap_or_default()
    }

    fn set_text(&mut self, text: &str) -> Result<(), EditorError> {
        self.live_mut()?.raw = CellInput::Text(text.to_string());
        Ok(())
    }

    fn value(&self) -> Option<T> {
        let session = self.session.as_ref()?;
        session.policy.convert(&session.raw)
    }

    fn is_cancel_after_end(&self) -> bool {
        let Some(session) = self.session.as_ref() else {
            return false;
        };
        let current = session.policy.convert(&session.raw);
        match (&current, &session.initial_value) {
            (None, None) => true,
            (Some(cur), Some(initial)) => cur.to_string() == initial.to_string(),
            _ => false,
        }
    }

    fn end_edit(&mut self) -> Result<EditOutcome<T>, EditorError> {
        self.live()?;
        let outcome = EditOutcome {
            value: self.value(),
            cancel_after_end: self.is_cancel_after_end(),
        };
        self.session = None;
        log::debug!("edit session ended (cancel_after_end={})", outcome.cancel_after_end);
        Ok(outcome)
    }

    fn discard(&mut self) {
        if self.session.take().is_some() {
            log::debug!("edit session discarded");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Whole numbers 0..=100, like a percentage cell.
    fn percent_policy() -> EditorPolicy<u32> {
        EditorPolicy::new("0123456789", "0123456789", |raw: &CellInput<u32>| match raw {
            CellInput::Typed(n) => Some(*n),
            CellInput::Text(s) => s.trim().parse::<u32>().ok().filter(|n| *n <= 100),
            _ => None,
        })
    }

    fn activated(value: CellInput<u32>, char_press: Option<char>) -> CellEditor<u32> {
        let mut editor = CellEditor::new();
        editor.activate(percent_policy(), EditParams { value, char_press });
        editor
    }

    #[test]
    fn test_activate_without_trigger() {
        let editor = activated(CellInput::text("42"), None);
        assert!(!editor.is_cancel_before_start());
        assert!(!editor.started_by_typing());
        assert_eq!(editor.text(), "42");
        assert_eq!(editor.session().unwrap().initial_value(), Some(&42));
    }

    #[test]
    fn test_activate_with_start_char_replaces_text() {
        let editor = activated(CellInput::text("42"), Some('7'));
        assert!(!editor.is_cancel_before_start());
        assert!(editor.started_by_typing());
        assert_eq!(editor.raw_value(), Some(&CellInput::text("7")));
        // Initial value still comes from the cell, not the trigger
        assert_eq!(editor.session().unwrap().initial_value(), Some(&42));
    }

    #[test]
    fn test_activate_with_invalid_char_cancels() {
        let editor = activated(CellInput::text("42"), Some('x'));
        assert!(editor.is_cancel_before_start());
        assert!(!editor.started_by_typing());
        assert_eq!(editor.raw_value(), Some(&CellInput::text("42")));
    }

    #[test]
    fn test_on_shown_selects_unless_typing() {
        let mut editor = activated(CellInput::text("42"), None);
        assert!(editor.on_shown().unwrap().selects_all());

        let mut editor = activated(CellInput::text("42"), Some('1'));
        assert!(!editor.on_shown().unwrap().selects_all());
    }

    #[test]
    fn test_on_shown_contract_errors() {
        let mut editor: CellEditor<u32> = CellEditor::new();
        assert_eq!(editor.on_shown(), Err(EditorError::NoActiveSession));

        let mut editor = activated(CellInput::Absent, Some('x'));
        assert_eq!(editor.on_shown(), Err(EditorError::CancelledBeforeStart));

        let mut editor = activated(CellInput::Absent, None);
        assert!(editor.on_shown().is_ok());
        assert_eq!(editor.on_shown(), Err(EditorError::AlreadyShown));
    }

    #[test]
    fn test_classify_requires_session() {
        let editor: CellEditor<u32> = CellEditor::new();
        assert_eq!(editor.classify_key(&Key::Char('1')), Err(EditorError::NoActiveSession));

        let editor = activated(CellInput::Absent, None);
        assert_eq!(editor.classify_key(&Key::Char('1')), Ok(KeyAction::Pass));
        assert_eq!(editor.classify_key(&Key::Char('-')), Ok(KeyAction::Reject));
    }

    #[test]
    fn test_cancel_after_end_compares_typed_values() {
        let mut editor = activated(CellInput::text("42"), None);
        editor.set_text(" 042 ").unwrap();
        assert_eq!(editor.value(), Some(42));
        assert!(editor.is_cancel_after_end());

        editor.set_text("43").unwrap();
        assert!(!editor.is_cancel_after_end());
    }

    #[test]
    fn test_cancel_after_end_both_absent() {
        let mut editor = activated(CellInput::Absent, None);
        assert!(editor.is_cancel_after_end());
        editor.set_text("").unwrap();
        assert!(editor.is_cancel_after_end());
    }

    #[test]
    fn test_cancel_after_end_one_absent() {
        let mut editor = activated(CellInput::text("42"), None);
        editor.set_text("").unwrap();
        assert_eq!(editor.value(), None);
        assert!(!editor.is_cancel_after_end());

        let mut editor = activated(CellInput::Absent, None);
        editor.set_text("5").unwrap();
        assert!(!editor.is_cancel_after_end());
    }

    #[test]
    fn test_out_of_range_edit_of_empty_cell_reads_as_unchanged() {
        // Out-of-range input converts to absent, same as the empty cell it replaced.
        let mut editor = activated(CellInput::Absent, None);
        editor.set_text("250").unwrap();
        assert_eq!(editor.value(), None);
        assert!(editor.is_cancel_after_end());
    }

    #[test]
    fn test_initial_value_is_cached() {
        let mut editor = activated(CellInput::text("10"), None);
        editor.set_text("20").unwrap();
        assert_eq!(editor.session().unwrap().initial_value(), Some(&10));
        assert_eq!(editor.session().unwrap().initial_raw(), &CellInput::text("10"));
    }

    #[test]
    fn test_reactivation_replaces_session() {
        let mut editor = activated(CellInput::text("10"), Some('x'));
        assert!(editor.is_cancel_before_start());

        editor.activate(percent_policy(), EditParams::new("20"));
        assert!(!editor.is_cancel_before_start());
        assert_eq!(editor.text(), "20");
        assert!(editor.on_shown().is_ok());
    }

    #[test]
    fn test_end_edit_discards_session() {
        let mut editor = activated(CellInput::text("10"), None);
        editor.set_text("11").unwrap();
        let outcome = editor.end_edit().unwrap();
        assert_eq!(outcome, EditOutcome { value: Some(11), cancel_after_end: false });
        assert!(!editor.is_active());
        assert_eq!(editor.end_edit(), Err(EditorError::NoActiveSession));
        assert_eq!(editor.set_text("1"), Err(EditorError::NoActiveSession));
    }

    #[test]
    fn test_discard() {
        let mut editor = activated(CellInput::text("10"), None);
        editor.discard();
        assert!(!editor.is_active());
        assert_eq!(editor.value(), None);
        assert_eq!(editor.text(), "");
    }
}
