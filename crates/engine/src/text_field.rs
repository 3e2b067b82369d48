//! A headless single-line text field.
//!
//! Not a UI widget, just the behaviour a host input has by default: typing
//! replaces the selection, backspace/delete, caret movement. The host harness
//! and the CLI use it to stand in for a real input element.

use crate::deferred::EditorInput;
use crate::key::Key;

/// What the field did with a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldAction {
    /// Text changed.
    Changed,
    /// Caret or selection moved, text unchanged.
    Moved,
    /// Key has no default behaviour in a single-line field.
    Ignored,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    chars: Vec<char>,
    /// Caret position in chars (0..=len).
    caret: usize,
    /// Selection anchor; the selection spans anchor..caret (either order).
    anchor: Option<usize>,
    focused: bool,
}

impl TextField {
    pub fn new(text: &str) -> Self {
        let chars: Vec<char> = text.chars().collect();
        let caret = chars.len();
        Self { chars, caret, anchor: None, focused: false }
    }

    pub fn text(&self) -> String {
        self.chars.iter().collect()
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Selected range in chars, if non-empty.
    pub fn selection(&self) -> Option<(usize, usize)> {
        let anchor = self.anchor?;
        if anchor == self.caret {
            return None;
        }
        Some((anchor.min(self.caret), anchor.max(self.caret)))
    }

    pub fn selected_text(&self) -> Option<String> {
        self.selection().map(|(start, end)| self.chars[start..end].iter().collect())
    }

    fn delete_selection(&mut self) -> bool {
        match self.selection() {
            Some((start, end)) => {
                self.chars.drain(start..end);
                self.caret = start;
                self.anchor = None;
                true
            }
            None => {
                self.anchor = None;
                false
            }
        }
    }

    fn move_caret(&mut self, to: usize) -> FieldAction {
        self.anchor = None;
        self.caret = to.min(self.chars.len());
        FieldAction::Moved
    }

    /// Insert a character at the caret, replacing any selection.
    pub fn insert_char(&mut self, c: char) {
        self.delete_selection();
        self.chars.insert(self.caret, c);
        self.caret += 1;
    }

    /// Apply the field's default handling for a key.
    pub fn apply_default(&mut self, key: &Key) -> FieldAction {
        match key {
            Key::Char(c) => {
                self.insert_char(*c);
                FieldAction::Changed
            }
            Key::Backspace => {
                if self.delete_selection() {
                    return FieldAction::Changed;
                }
                if self.caret == 0 {
                    return FieldAction::Ignored;
                }
                self.caret -= 1;
                self.chars.remove(self.caret);
                FieldAction::Changed
            }
            Key::Delete => {
                if self.delete_selection() {
                    return FieldAction::Changed;
                }
                if self.caret >= self.chars.len() {
                    return FieldAction::Ignored;
                }
                self.chars.remove(self.caret);
                FieldAction::Changed
            }
            Key::ArrowLeft => match self.selection() {
                Some((start, _)) => self.move_caret(start),
                None => self.move_caret(self.caret.saturating_sub(1)),
            },
            Key::ArrowRight => match self.selection() {
                Some((_, end)) => self.move_caret(end),
                None => self.move_caret(self.caret + 1),
            },
            // Single line: up/down behave like home/end
            Key::ArrowUp | Key::Home => self.move_caret(0),
            Key::ArrowDown | Key::End => self.move_caret(self.chars.len()),
            _ => FieldAction::Ignored,
        }
    }

    /// Paste text at the caret. Control characters are stripped.
    pub fn paste(&mut self, text: &str) -> FieldAction {
        let clean: Vec<char> = text.chars().filter(|c| !c.is_control()).collect();
        if clean.is_empty() {
            return FieldAction::Ignored;
        }
        for c in clean {
            self.insert_char(c);
        }
        FieldAction::Changed
    }
}

impl EditorInput for TextField {
    fn focus(&mut self) {
        self.focused = true;
    }

    fn select_all(&mut self) {
        self.anchor = Some(0);
        self.caret = self.chars.len();
    }
}
