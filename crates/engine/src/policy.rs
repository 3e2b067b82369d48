//! Character classification policy: the capability record a concrete
//! editor supplies to the generic controller.
//!
//! An editor is just a value of [`EditorPolicy`]: which characters may
//! appear in the input, which may start an edit, and how raw input converts
//! to the typed value. An optional seed hook renders the initial value for
//! display.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use crate::value::CellInput;

/// Converts raw input into the typed value. `None` means absent/invalid.
pub type ConvertFn<T> = dyn Fn(&CellInput<T>) -> Option<T> + Send + Sync;

/// Renders the initial raw value as input text, if the editor wants to.
pub type SeedFn<T> = dyn Fn(&CellInput<T>) -> Option<String> + Send + Sync;

/// A closed alphabet of characters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharSet {
    chars: BTreeSet<char>,
}

impl CharSet {
    pub fn new(chars: &str) -> Self {
        Self { chars: chars.chars().collect() }
    }

    pub fn contains(&self, c: char) -> bool {
        self.chars.contains(&c)
    }

    pub fn is_subset(&self, other: &CharSet) -> bool {
        self.chars.is_subset(&other.chars)
    }

    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        self.chars.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }
}

impl From<&str> for CharSet {
    fn from(chars: &str) -> Self {
        Self::new(chars)
    }
}

impl fmt::Display for CharSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.chars {
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

/// Per-editor configuration. Immutable once a session is activated with it.
pub struct EditorPolicy<T> {
    /// Characters allowed to be in the value.
    pub allowed_chars: CharSet,
    /// Characters allowed to start an edit (should be a subset of `allowed_chars`).
    pub start_edit_chars: CharSet,
    convert: Arc<ConvertFn<T>>,
    seed: Option<Arc<SeedFn<T>>>,
}

impl<T> EditorPolicy<T> {
    pub fn new(
        allowed_chars: impl Into<CharSet>,
        start_edit_chars: impl Into<CharSet>,
        convert: impl Fn(&CellInput<T>) -> Option<T> + Send + Sync + 'static,
    ) -> Self {
        let policy = Self {
            allowed_chars: allowed_chars.into(),
            start_edit_chars: start_edit_chars.into(),
            convert: Arc::new(convert),
            seed: None,
        };
        if !policy.start_edit_chars.is_subset(&policy.allowed_chars) {
            log::warn!(
                "start-edit chars {:?} are not a subset of allowed chars {:?}",
                policy.start_edit_chars.to_string(),
                policy.allowed_chars.to_string()
            );
        }
        policy
    }

    /// Set the hook that renders the initial value as input text.
    pub fn with_seed(
        mut self,
        seed: impl Fn(&CellInput<T>) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        self.seed = Some(Arc::new(seed));
        self
    }

    pub fn convert(&self, raw: &CellInput<T>) -> Option<T> {
        (self.convert)(raw)
    }

    pub fn seed(&self, raw: &CellInput<T>) -> Option<String> {
        self.seed.as_ref().and_then(|seed| seed(raw))
    }

    pub fn is_allowed(&self, c: char) -> bool {
        self.allowed_chars.contains(c)
    }

    pub fn can_start_edit(&self, c: char) -> bool {
        self.start_edit_chars.contains(c)
    }
}

impl<T> Clone for EditorPolicy<T> {
    fn clone(&self) -> Self {
        Self {
            allowed_chars: self.allowed_chars.clone(),
            start_edit_chars: self.start_edit_chars.clone(),
            convert: Arc::clone(&self.convert),
            seed: self.seed.clone(),
        }
    }
}

impl<T> fmt::Debug for EditorPolicy<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditorPolicy")
            .field("allowed_chars", &self.allowed_chars.to_string())
            .field("start_edit_chars", &self.start_edit_chars.to_string())
            .field("seed", &self.seed.is_some())
            .finish()
    }
}
