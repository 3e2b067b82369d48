//! Keystroke classification.
//!
//! Every keystroke typed into the cell input lands in exactly one of four
//! outcomes. The checks run in a fixed order: navigation and modifier keys
//! are recognised before alphabet membership is looked at, so an arrow key is
//! never rejected for not being an allowed character.

use serde::{Deserialize, Serialize};

use crate::key::{Key, KeyCategory};
use crate::policy::EditorPolicy;

/// What the host must do with a keystroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    /// No interception. The grid and the input handle the key normally.
    Pass,
    /// Keep the key away from the grid, but let the input handle it.
    RedirectToField,
    /// No interception and no validation (delete, backspace, escape).
    AllowSpecial,
    /// Swallow the key: no default input handling, invisible to the grid.
    Reject,
}

impl KeyAction {
    /// Whether the host must stop the event from reaching the grid.
    pub fn stops_propagation(self) -> bool {
        matches!(self, KeyAction::RedirectToField | KeyAction::Reject)
    }

    /// Whether the host must suppress the input's default handling.
    pub fn prevents_default(self) -> bool {
        matches!(self, KeyAction::Reject)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            KeyAction::Pass => "pass",
            KeyAction::RedirectToField => "redirect_to_field",
            KeyAction::AllowSpecial => "allow_special",
            KeyAction::Reject => "reject",
        }
    }
}

impl std::fmt::Display for KeyAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Classify a keystroke against a policy.
pub fn classify_key<T>(policy: &EditorPolicy<T>, key: &Key) -> KeyAction {
    match key.category() {
        KeyCategory::GridNavigation => KeyAction::Pass,
        KeyCategory::FieldNavigation => KeyAction::RedirectToField,
        KeyCategory::SpecialModifier => KeyAction::AllowSpecial,
        KeyCategory::Input => match key.as_char() {
            Some(c) if policy.is_allowed(c) => KeyAction::Pass,
            _ => {
                log::trace!("rejecting key {}", key);
                KeyAction::Reject
            }
        },
    }
}
