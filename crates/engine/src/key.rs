//! Keystroke identifiers, independent of any UI toolkit.
//!
//! Hosts convert their native key events into [`Key`] at the boundary. The
//! string form follows the DOM `KeyboardEvent.key` names ("Tab", "ArrowLeft",
//! "5", "/"), so a host that already speaks that vocabulary can use
//! [`Key::from_str`](std::str::FromStr) directly.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A single keystroke as seen by the cell editor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Key {
    /// Printable character (digits, letters, symbols, space)
    Char(char),

    // Grid navigation
    Tab,
    Enter,

    // Field navigation
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    // Special modifiers
    Backspace,
    Delete,
    Escape,

    // Other named keys. Recognised by name but belonging to no category.
    Home,
    End,
    PageUp,
    PageDown,
    Insert,
    /// Function key (F1-F24)
    F(u8),

    /// Any identifier we don't have a name for ("Shift", "MediaPlay", ...)
    Other(String),
}

/// The fixed keystroke categories every edit session uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyCategory {
    /// Ends the edit and moves focus in the grid.
    GridNavigation,
    /// Moves the caret inside the input; must not reach the grid.
    FieldNavigation,
    /// Edits the raw text without alphabet validation.
    SpecialModifier,
    /// Everything else, validated against the allowed alphabet.
    Input,
}

/// Keys which navigate in the grid (ending the edit).
pub const GRID_NAVIGATION_KEYS: &[Key] = &[Key::Tab, Key::Enter];

/// Keys that would normally navigate in the grid but move the caret instead.
pub const FIELD_NAVIGATION_KEYS: &[Key] = &[Key::ArrowUp, Key::ArrowDown, Key::ArrowLeft, Key::ArrowRight];

/// Keys that modify the input but introduce no new characters.
pub const SPECIAL_MODIFIER_KEYS: &[Key] = &[Key::Backspace, Key::Delete, Key::Escape];

impl Key {
    /// Which fixed category this key falls into.
    pub fn category(&self) -> KeyCategory {
        if GRID_NAVIGATION_KEYS.contains(self) {
            KeyCategory::GridNavigation
        } else if FIELD_NAVIGATION_KEYS.contains(self) {
            KeyCategory::FieldNavigation
        } else if SPECIAL_MODIFIER_KEYS.contains(self) {
            KeyCategory::SpecialModifier
        } else {
            KeyCategory::Input
        }
    }

    /// The character this key types, if it is a printable key.
    pub fn as_char(&self) -> Option<char> {
        match self {
            Key::Char(c) => Some(*c),
            _ => None,
        }
    }

    /// Parse a whitespace-separated key script, e.g. `"0 3 / ArrowLeft Tab"`.
    ///
    /// `Space` must be spelled out since bare spaces separate tokens.
    pub fn parse_sequence(script: &str) -> Vec<Key> {
        script
            .split_whitespace()
            .map(|token| token.parse().unwrap_or_else(|e: KeyParseError| Key::Other(e.0)))
            .collect()
    }
}

/// Error for an empty key identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyParseError(pub String);

impl fmt::Display for KeyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid key identifier: {:?}", self.0)
    }
}

impl std::error::Error for KeyParseError {}

impl FromStr for Key {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (None, _) => return Err(KeyParseError(s.to_string())),
            (Some(c), None) => return Ok(Key::Char(c)),
            _ => {}
        }

        let key = match s {
            "Tab" => Key::Tab,
            "Enter" | "Return" => Key::Enter,
            "ArrowUp" | "Up" => Key::ArrowUp,
            "ArrowDown" | "Down" => Key::ArrowDown,
            "ArrowLeft" | "Left" => Key::ArrowLeft,
            "ArrowRight" | "Right" => Key::ArrowRight,
            "Backspace" => Key::Backspace,
            "Delete" | "Del" => Key::Delete,
            "Escape" | "Esc" => Key::Escape,
            "Home" => Key::Home,
            "End" => Key::End,
            "PageUp" => Key::PageUp,
            "PageDown" => Key::PageDown,
            "Insert" => Key::Insert,
            "Space" | "Spacebar" => Key::Char(' '),
            _ => match s.strip_prefix('F').and_then(|n| n.parse::<u8>().ok()) {
                Some(n) if (1..=24).contains(&n) => Key::F(n),
                _ => Key::Other(s.to_string()),
            },
        };
        Ok(key)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Char(' ') => write!(f, "Space"),
            Key::Char(c) => write!(f, "{}", c),
            Key::Tab => write!(f, "Tab"),
            Key::Enter => write!(f, "Enter"),
            Key::ArrowUp => write!(f, "ArrowUp"),
            Key::ArrowDown => write!(f, "ArrowDown"),
            Key::ArrowLeft => write!(f, "ArrowLeft"),
            Key::ArrowRight => write!(f, "ArrowRight"),
            Key::Backspace => write!(f, "Backspace"),
            Key::Delete => write!(f, "Delete"),
            Key::Escape => write!(f, "Escape"),
            Key::Home => write!(f, "Home"),
            Key::End => write!(f, "End"),
            Key::PageUp => write!(f, "PageUp"),
            Key::PageDown => write!(f, "PageDown"),
            Key::Insert => write!(f, "Insert"),
            Key::F(n) => write!(f, "F{}", n),
            Key::Other(name) => write!(f, "{}", name),
        }
    }
}

impl From<char> for Key {
    fn from(c: char) -> Self {
        Key::Char(c)
    }
}

impl From<Key> for String {
    fn from(key: Key) -> Self {
        key.to_string()
    }
}

impl TryFrom<String> for Key {
    type Error = KeyParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}
