// Column editor configuration
// Loaded from ~/.config/celledit/editors.json (or any .json / .toml path)

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use celledit_engine::date::format_date;
use celledit_engine::EditorOptions;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Which concrete editor a column uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorKind {
    /// Month/day/year dates
    Date,
}

impl std::fmt::Display for EditorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Date => write!(f, "date"),
        }
    }
}

/// Editor for one column, plus the options handed to it at activation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnEditor {
    pub editor: EditorKind,
    #[serde(default)]
    pub options: EditorOptions,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorsConfig {
    /// Column id -> editor
    pub columns: BTreeMap<String, ColumnEditor>,
}

impl EditorsConfig {
    /// Get the default config file path
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("celledit")
            .join("editors.json")
    }

    /// Parse JSON, allowing whole-line `//` comments
    pub fn from_json_str(contents: &str) -> Result<Self, ConfigError> {
        let cleaned: String = contents
            .lines()
            .filter(|line| !line.trim().starts_with("//"))
            .collect::<Vec<_>>()
            .join("\n");

        serde_json::from_str(&cleaned).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Parse TOML. Native dates (`minValue = 2020-01-01`) become the same
    /// month/day/year text a JSON config would carry; a datetime keeps its date.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let mut value: toml::Value = toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
        dates_to_text(&mut value)?;
        value.try_into().map_err(|e: toml::de::Error| ConfigError::Parse(e.to_string()))
    }

    /// Load from a file; `.toml` files are TOML, everything else JSON
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;

        let is_toml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        if is_toml {
            Self::from_toml_str(&contents)
        } else {
            Self::from_json_str(&contents)
        }
    }

    /// Load the default file, falling back to an empty config
    pub fn load_or_default() -> Self {
        let path = Self::default_path();
        if !path.exists() {
            return Self::default();
        }

        match Self::load(&path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Error loading {}: {}", path.display(), e);
                log::warn!("Using empty editor config");
                Self::default()
            }
        }
    }

    /// Save as pretty JSON
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io(e.to_string()))?;
        }

        let json = serde_json::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?;

        fs::write(path, json).map_err(|e| ConfigError::Io(e.to_string()))
    }

    pub fn column(&self, id: &str) -> Result<&ColumnEditor, ConfigError> {
        self.columns
            .get(id)
            .ok_or_else(|| ConfigError::UnknownColumn(id.to_string()))
    }
}

fn dates_to_text(value: &mut toml::Value) -> Result<(), ConfigError> {
    match value {
        toml::Value::Datetime(dt) => {
            let date = dt
                .date
                .and_then(|d| NaiveDate::from_ymd_opt(i32::from(d.year), u32::from(d.month), u32::from(d.day)))
                .ok_or_else(|| ConfigError::Parse(format!("expected a date, found {}", dt)))?;
            *value = toml::Value::String(format_date(date));
        }
        toml::Value::Array(items) => {
            for item in items {
                dates_to_text(item)?;
            }
        }
        toml::Value::Table(table) => {
            for (_, item) in table.iter_mut() {
                dates_to_text(item)?;
            }
        }
        _ => {}
    }
    Ok(())
}
