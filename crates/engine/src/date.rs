//! Date cell editor: month/day/year text in, `NaiveDate` out.
//!
//! Options:
//! - `minValue`: earliest accepted date (raw value, e.g. `"01/01/2020"`)
//! - `maxValue`: latest accepted date
//!
//! Bounds are converted once per activation. A bound that is missing, null
//! or unparsable imposes no limit. Bounds aren't checked against each
//! other: with `minValue` after `maxValue` every date is rejected.
//!
//! Dates outside the bounds convert to absent, exactly like unparsable text.

use chrono::NaiveDate;

use crate::classify::KeyAction;
use crate::controller::{CellEditor, EditOutcome, GridCellEditor};
use crate::deferred::FocusTask;
use crate::error::EditorError;
use crate::key::Key;
use crate::policy::EditorPolicy;
use crate::session::EditParams;
use crate::value::{CellInput, EditorOptions};

/// Characters allowed to be in the value.
pub const ALLOWED_CHARS: &str = "1234567890/";

/// Characters allowed to start an edit. The separator can't.
pub const START_EDIT_CHARS: &str = "1234567890";

/// Accepts single-digit month and day.
pub const PARSE_PATTERN: &str = "%-m/%-d/%Y";

/// Always two-digit month and day.
pub const DISPLAY_PATTERN: &str = "%m/%d/%Y";

pub const PLACEHOLDER: &str = "MM/DD/YYYY";

pub const MIN_VALUE_OPTION: &str = "minValue";
pub const MAX_VALUE_OPTION: &str = "maxValue";

/// Parse month/day/year text. `None` for anything that isn't a real date
/// in that shape.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    let mut parts = text.split('/');
    let (month, day, year) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }

    let digits = |s: &str, min: usize, max: usize| {
        (min..=max).contains(&s.len()) && s.bytes().all(|b| b.is_ascii_digit())
    };
    if !digits(month, 1, 2) || !digits(day, 1, 2) || !digits(year, 4, 4) {
        return None;
    }

    NaiveDate::parse_from_str(text, PARSE_PATTERN).ok()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DISPLAY_PATTERN).to_string()
}

/// Convert any raw value to a date, ignoring bounds.
pub fn to_local_date(raw: &CellInput<NaiveDate>) -> Option<NaiveDate> {
    match raw {
        CellInput::Typed(date) => Some(*date),
        CellInput::Timestamp(ts) => Some(ts.date()),
        CellInput::Text(s) => {
            if s.trim().is_empty() {
                return None;
            }
            parse_date(s)
        }
        _ => None,
    }
}

/// Optional inclusive date range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateBounds {
    pub min: Option<NaiveDate>,
    pub max: Option<NaiveDate>,
}

impl DateBounds {
    pub fn new(min: Option<NaiveDate>, max: Option<NaiveDate>) -> Self {
        Self { min, max }
    }

    /// Read `minValue` / `maxValue`; other options are ignored.
    pub fn from_options(options: &EditorOptions) -> Self {
        let bound = |name: &str| {
            let raw = options.defined(name)?;
            let date = to_local_date(&raw.to_input());
            if date.is_none() {
                log::warn!("ignoring unparsable {} option: {:?}", name, raw);
            }
            date
        };
        Self { min: bound(MIN_VALUE_OPTION), max: bound(MAX_VALUE_OPTION) }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        if self.min.is_some_and(|min| date < min) {
            return false;
        }
        if self.max.is_some_and(|max| date > max) {
            return false;
        }
        true
    }
}

/// The date editor's policy record for the given bounds.
pub fn date_policy(bounds: DateBounds) -> EditorPolicy<NaiveDate> {
    EditorPolicy::new(ALLOWED_CHARS, START_EDIT_CHARS, move |raw: &CellInput<NaiveDate>| {
        to_local_date(raw).filter(|date| bounds.contains(*date))
    })
    .with_seed(|raw| match raw {
        CellInput::Typed(date) => Some(format_date(*date)),
        CellInput::Timestamp(ts) => Some(format_date(ts.date())),
        _ => None,
    })
}

/// Cell editor for calendar dates.
#[derive(Debug, Default)]
pub struct DateCellEditor {
    editor: CellEditor<NaiveDate>,
    bounds: DateBounds,
}

impl DateCellEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn activate(&mut self, params: EditParams<NaiveDate>, options: &EditorOptions) {
        self.bounds = DateBounds::from_options(options);
        self.editor.activate(date_policy(self.bounds), params);
    }

    pub fn bounds(&self) -> DateBounds {
        self.bounds
    }

    pub fn placeholder(&self) -> &'static str {
        PLACEHOLDER
    }

    pub fn inner(&self) -> &CellEditor<NaiveDate> {
        &self.editor
    }
}

impl GridCellEditor for DateCellEditor {
    type Value = NaiveDate;

    fn is_active(&self) -> bool {
        self.editor.is_active()
    }

    fn classify_key(&self, key: &Key) -> Result<KeyAction, EditorError> {
        self.editor.classify_key(key)
    }

    fn is_cancel_before_start(&self) -> bool {
        self.editor.is_cancel_before_start()
    }

    fn on_shown(&mut self) -> Result<FocusTask, EditorError> {
        self.editor.on_shown()
    }

    fn text(&self) -> String {
        self.editor.text()
    }

    fn set_text(&mut self, text: &str) -> Result<(), EditorError> {
        self.editor.set_text(text)
    }

    fn value(&self) -> Option<NaiveDate> {
        self.editor.value()
    }

    fn is_cancel_after_end(&self) -> bool {
        self.editor.is_cancel_after_end()
    }

    fn end_edit(&mut self) -> Result<EditOutcome<NaiveDate>, EditorError> {
        self.editor.end_edit()
    }

    fn discard(&mut self) {
        self.editor.discard()
    }
}
