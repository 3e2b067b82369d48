//! Deferred focus/selection.
//!
//! When the editor becomes visible its input may not be interactable yet, so
//! focusing it is a one-shot task the host runs after the current
//! activation/render cycle. [`DeferredQueue`] is a minimal FIFO scheduler for
//! hosts that don't have one of their own.

use std::collections::VecDeque;
use std::fmt;

/// The two things the controller needs from an input widget.
pub trait EditorInput {
    fn focus(&mut self);
    fn select_all(&mut self);
}

/// One-shot focus (and optionally select-all) for the editor input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "a focus task does nothing until it is run"]
pub struct FocusTask {
    select_all: bool,
}

impl FocusTask {
    pub(crate) fn new(select_all: bool) -> Self {
        Self { select_all }
    }

    pub fn selects_all(&self) -> bool {
        self.select_all
    }

    /// Focus the input; select its whole text if the edit wasn't started by typing.
    pub fn run(self, input: &mut dyn EditorInput) {
        input.focus();
        if self.select_all {
            input.select_all();
        }
    }
}

type Task<I> = Box<dyn FnOnce(&mut I)>;

/// FIFO of work deferred to the next scheduling turn.
///
/// Tasks run strictly in push order. Tasks pushed while draining wait for
/// the next turn.
pub struct DeferredQueue<I> {
    tasks: VecDeque<Task<I>>,
}

impl<I: EditorInput + 'static> DeferredQueue<I> {
    pub fn new() -> Self {
        Self { tasks: VecDeque::new() }
    }

    pub fn push(&mut self, task: impl FnOnce(&mut I) + 'static) {
        self.tasks.push_back(Box::new(task));
    }

    pub fn push_focus(&mut self, task: FocusTask) {
        self.push(move |input: &mut I| task.run(input));
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Run everything queued so far. Returns the number of tasks run.
    pub fn run_pending(&mut self, input: &mut I) -> usize {
        let batch: Vec<Task<I>> = self.tasks.drain(..).collect();
        let count = batch.len();
        for task in batch {
            task(input);
        }
        count
    }
}

impl<I: EditorInput + 'static> Default for DeferredQueue<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I> fmt::Debug for DeferredQueue<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeferredQueue").field("pending", &self.tasks.len()).finish()
    }
}
