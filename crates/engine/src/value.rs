//! Raw cell values and adapter options as handed over by the host grid.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A raw value: what the host passes in at activation, and what the input
/// currently holds.
///
/// Hosts rarely hand over plain text only. A cell may already hold the
/// typed domain value, a native timestamp, or something the editor has no
/// use for (numbers, booleans). Conversion decides what to make of each.
#[derive(Debug, Clone, PartialEq)]
pub enum CellInput<T> {
    /// undefined / null
    Absent,
    Text(String),
    /// Already the editor's domain type.
    Typed(T),
    /// Native date-like value.
    Timestamp(NaiveDateTime),
    Number(f64),
    Bool(bool),
    /// Any other host value (arrays, objects).
    Other(serde_json::Value),
}

impl<T> Default for CellInput<T> {
    fn default() -> Self {
        CellInput::Absent
    }
}

impl<T> CellInput<T> {
    pub fn text(s: impl Into<String>) -> Self {
        CellInput::Text(s.into())
    }

    /// False only for `Absent`. Empty text is still defined.
    pub fn is_defined(&self) -> bool {
        !matches!(self, CellInput::Absent)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellInput::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl<T: fmt::Display> CellInput<T> {
    /// Text to show in the input for this value.
    pub fn display_text(&self) -> String {
        match self {
            CellInput::Absent => String::new(),
            CellInput::Text(s) => s.clone(),
            CellInput::Typed(v) => v.to_string(),
            CellInput::Timestamp(ts) => ts.to_string(),
            CellInput::Number(n) => n.to_string(),
            CellInput::Bool(b) => b.to_string(),
            CellInput::Other(v) => v.to_string(),
        }
    }
}

impl<T> From<&str> for CellInput<T> {
    fn from(s: &str) -> Self {
        CellInput::Text(s.to_string())
    }
}

impl<T> From<String> for CellInput<T> {
    fn from(s: String) -> Self {
        CellInput::Text(s)
    }
}

impl<T> From<Option<String>> for CellInput<T> {
    fn from(s: Option<String>) -> Self {
        s.map_or(CellInput::Absent, CellInput::Text)
    }
}

impl<T> From<NaiveDateTime> for CellInput<T> {
    fn from(ts: NaiveDateTime) -> Self {
        CellInput::Timestamp(ts)
    }
}

/// A single adapter option value, as it appears in JSON/TOML config or host params.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    /// Arrays, objects: kept so they round-trip, never understood.
    Other(serde_json::Value),
}

impl OptionValue {
    pub fn is_defined(&self) -> bool {
        !matches!(self, OptionValue::Null)
    }

    /// Hand the option to a conversion function as raw input.
    pub fn to_input<T>(&self) -> CellInput<T> {
        match self {
            OptionValue::Null => CellInput::Absent,
            OptionValue::Bool(b) => CellInput::Bool(*b),
            OptionValue::Number(n) => CellInput::Number(*n),
            OptionValue::Text(s) => CellInput::Text(s.clone()),
            OptionValue::Other(v) => CellInput::Other(v.clone()),
        }
    }
}

impl From<&str> for OptionValue {
    fn from(s: &str) -> Self {
        OptionValue::Text(s.to_string())
    }
}

impl From<serde_json::Value> for OptionValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => OptionValue::Null,
            serde_json::Value::Bool(b) => OptionValue::Bool(b),
            serde_json::Value::Number(n) => match n.as_f64() {
                Some(f) => OptionValue::Number(f),
                None => OptionValue::Other(serde_json::Value::Number(n)),
            },
            serde_json::Value::String(s) => OptionValue::Text(s),
            other => OptionValue::Other(other),
        }
    }
}

/// Named options for a concrete editor (`minValue`, `maxValue`, ...).
///
/// Which keys mean anything is up to the adapter; the rest are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EditorOptions {
    values: BTreeMap<String, OptionValue>,
}

impl EditorOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<OptionValue>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.values.get(name)
    }

    /// The option if present and not null.
    pub fn defined(&self, name: &str) -> Option<&OptionValue> {
        self.get(name).filter(|v| v.is_defined())
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Build from a JSON object of host params. Non-object input yields no options.
    pub fn from_json(params: serde_json::Value) -> Self {
        match params {
            serde_json::Value::Object(map) => Self {
                values: map.into_iter().map(|(k, v)| (k, OptionValue::from(v))).collect(),
            },
            _ => Self::default(),
        }
    }
}
