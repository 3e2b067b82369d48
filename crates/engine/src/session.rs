//! Per-activation edit session state.

use std::sync::Arc;

use crate::policy::EditorPolicy;
use crate::value::CellInput;

/// Parameters the host passes when it starts editing a cell.
#[derive(Debug, Clone, PartialEq)]
pub struct EditParams<T> {
    /// The value the cell held before editing began.
    pub value: CellInput<T>,
    /// The key pressed to start the edit, if the edit was started by typing.
    /// `None` for double-click, Enter, F2, or an API call.
    pub char_press: Option<char>,
}

impl<T> EditParams<T> {
    pub fn new(value: impl Into<CellInput<T>>) -> Self {
        Self { value: value.into(), char_press: None }
    }

    pub fn with_char_press(mut self, c: char) -> Self {
        self.char_press = Some(c);
        self
    }
}

/// State of one live edit session. Replaced wholesale on every activation.
#[derive(Debug)]
pub struct EditSession<T> {
    pub(crate) policy: Arc<EditorPolicy<T>>,
    pub(crate) raw: CellInput<T>,
    pub(crate) initial_raw: CellInput<T>,
    /// Converted once from `initial_raw` at activation; never recomputed.
    pub(crate) initial_value: Option<T>,
    pub(crate) started_by_typing: bool,
    pub(crate) cancel_before_start: bool,
    pub(crate) shown: bool,
}

impl<T> EditSession<T> {
    pub(crate) fn start(policy: EditorPolicy<T>, params: EditParams<T>) -> Self
    where
        T: Clone,
    {
        let policy = Arc::new(policy);
        let initial_value = policy.convert(&params.value);
        let mut session = Self {
            policy,
            raw: params.value.clone(),
            initial_raw: params.value,
            initial_value,
            started_by_typing: false,
            cancel_before_start: false,
            shown: false,
        };

        if let Some(c) = params.char_press {
            // The user attempted to start an edit by pressing a key
            if session.policy.can_start_edit(c) {
                session.started_by_typing = true;
                session.raw = CellInput::Text(c.to_string());
            } else {
                session.cancel_before_start = true;
            }
        }

        // A cancelled session is never shown, so its raw value stays as given
        if !session.started_by_typing && !session.cancel_before_start {
            if let Some(text) = session.policy.seed(&session.raw) {
                session.raw = CellInput::Text(text);
            }
        }

        session
    }

    pub fn raw(&self) -> &CellInput<T> {
        &self.raw
    }

    pub fn initial_raw(&self) -> &CellInput<T> {
        &self.initial_raw
    }

    pub fn initial_value(&self) -> Option<&T> {
        self.initial_value.as_ref()
    }

    pub fn started_by_typing(&self) -> bool {
        self.started_by_typing
    }

    pub fn cancel_before_start(&self) -> bool {
        self.cancel_before_start
    }

    pub fn policy(&self) -> &EditorPolicy<T> {
        &self.policy
    }
}
