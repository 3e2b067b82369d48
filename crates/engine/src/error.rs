use std::fmt;

/// Host contract violations. Domain failures (unparsable or out-of-range
/// input, disallowed keys) never show up here: they degrade to an absent
/// value or a rejected keystroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorError {
    /// No edit session is live (never activated, or already ended).
    NoActiveSession,
    /// The session was cancelled before start; the editor must not be shown.
    CancelledBeforeStart,
    /// `on_shown` was already called for this session.
    AlreadyShown,
}

impl fmt::Display for EditorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoActiveSession => write!(f, "no active edit session"),
            Self::CancelledBeforeStart => write!(f, "edit session was cancelled before start"),
            Self::AlreadyShown => write!(f, "editor was already shown for this session"),
        }
    }
}

impl std::error::Error for EditorError {}
