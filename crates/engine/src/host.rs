//! Headless host for a cell editor.
//!
//! `EditHost` plays the grid's side of the editor contract without any GUI:
//! - aborts immediately when the editor cancels before start
//! - shows a [`TextField`], queues the focus task and drains it next turn
//! - applies every [`KeyAction`] to the field and the grid as required
//! - ends the edit on Tab/Enter and discards it on Escape
//!
//! Use it to test editors end to end, or to replay key scripts from the CLI.

use serde::Serialize;

use crate::classify::KeyAction;
use crate::controller::GridCellEditor;
use crate::deferred::DeferredQueue;
use crate::error::EditorError;
use crate::key::Key;
use crate::text_field::{FieldAction, TextField};

/// How (or whether) the edit finished.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum HostOutcome<T> {
    /// Still editing.
    Editing,
    /// The trigger key could not start an edit; the editor was never shown.
    CancelledBeforeStart,
    /// The grid cancelled the edit (Escape). The cell keeps its value.
    Discarded,
    /// The edit resolved to the cell's original value. The cell keeps its value.
    Unchanged,
    /// The grid writes this value to the cell (`None` clears it).
    Committed(Option<T>),
}

impl<T> HostOutcome<T> {
    pub fn is_finished(&self) -> bool {
        !matches!(self, HostOutcome::Editing)
    }
}

/// One keystroke as the host processed it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyRecord {
    pub key: Key,
    pub action: KeyAction,
    /// Whether the keystroke reached the grid.
    pub grid_saw: bool,
    pub text_after: String,
}

pub struct EditHost<E: GridCellEditor> {
    editor: E,
    field: Option<TextField>,
    deferred: DeferredQueue<TextField>,
    outcome: HostOutcome<E::Value>,
    log: Vec<KeyRecord>,
}

impl<E: GridCellEditor> EditHost<E> {
    /// Take over an already activated editor and show it, unless it
    /// cancelled before start.
    pub fn start(mut editor: E) -> Result<Self, EditorError> {
        if !editor.is_active() {
            return Err(EditorError::NoActiveSession);
        }

        if editor.is_cancel_before_start() {
            log::debug!("editor cancelled before start, not shown");
            editor.discard();
            return Ok(Self {
                editor,
                field: None,
                deferred: DeferredQueue::new(),
                outcome: HostOutcome::CancelledBeforeStart,
                log: Vec::new(),
            });
        }

        let mut host = Self {
            field: Some(TextField::new(&editor.text())),
            deferred: DeferredQueue::new(),
            outcome: HostOutcome::Editing,
            log: Vec::new(),
            editor,
        };

        // Attached now, interactable next turn
        let task = host.editor.on_shown()?;
        host.deferred.push_focus(task);
        host.run_deferred();
        Ok(host)
    }

    /// Drain deferred work (the "next turn").
    pub fn run_deferred(&mut self) -> usize {
        match self.field.as_mut() {
            Some(field) => self.deferred.run_pending(field),
            None => 0,
        }
    }

    pub fn editor(&self) -> &E {
        &self.editor
    }

    pub fn field(&self) -> Option<&TextField> {
        self.field.as_ref()
    }

    pub fn outcome(&self) -> &HostOutcome<E::Value> {
        &self.outcome
    }

    pub fn into_outcome(self) -> HostOutcome<E::Value> {
        self.outcome
    }

    pub fn key_log(&self) -> &[KeyRecord] {
        &self.log
    }

    /// Deliver one keystroke. Ignored once the edit has finished.
    pub fn press(&mut self, key: &Key) -> Result<Option<KeyAction>, EditorError> {
        if self.outcome.is_finished() {
            return Ok(None);
        }
        let Some(field) = self.field.as_mut() else {
            return Ok(None);
        };

        let action = self.editor.classify_key(key)?;

        if !action.prevents_default() && field.apply_default(key) == FieldAction::Changed {
            self.editor.set_text(&field.text())?;
        }
        let text_after = field.text();

        let grid_saw = !action.stops_propagation();
        self.log.push(KeyRecord { key: key.clone(), action, grid_saw, text_after });

        if grid_saw {
            self.grid_key(key)?;
        }
        Ok(Some(action))
    }

    /// Deliver keys in order. Returns how many were delivered before the
    /// edit finished; the rest are dropped.
    pub fn press_all<'a>(&mut self, keys: impl IntoIterator<Item = &'a Key>) -> Result<usize, EditorError> {
        let mut delivered = 0;
        for key in keys {
            if self.press(key)?.is_some() {
                delivered += 1;
            }
        }
        Ok(delivered)
    }

    /// Paste into the field. Pasting doesn't go through key classification,
    /// so the text may contain characters typing would reject.
    pub fn paste(&mut self, text: &str) -> Result<Option<FieldAction>, EditorError> {
        if self.outcome.is_finished() {
            return Ok(None);
        }
        let Some(field) = self.field.as_mut() else {
            return Ok(None);
        };
        let action = field.paste(text);
        if action == FieldAction::Changed {
            self.editor.set_text(&field.text())?;
        }
        Ok(Some(action))
    }

    /// Type each character of `text` as its own keystroke.
    pub fn type_text(&mut self, text: &str) -> Result<(), EditorError> {
        for c in text.chars() {
            self.press(&Key::Char(c))?;
        }
        Ok(())
    }

    /// The grid's reaction to keys it can see while editing.
    fn grid_key(&mut self, key: &Key) -> Result<(), EditorError> {
        match key {
            Key::Tab | Key::Enter => self.stop_editing(),
            Key::Escape => {
                self.editor.discard();
                self.outcome = HostOutcome::Discarded;
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// End the edit the way the grid does on commit (also used for focus loss).
    pub fn stop_editing(&mut self) -> Result<(), EditorError> {
        if self.outcome.is_finished() {
            return Ok(());
        }
        let result = self.editor.end_edit()?;
        self.outcome = if result.cancel_after_end {
            HostOutcome::Unchanged
        } else {
            HostOutcome::Committed(result.value)
        };
        Ok(())
    }
}
