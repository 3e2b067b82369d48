use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// File read / write error.
    Io(String),
    /// JSON or TOML parse / deserialization error.
    Parse(String),
    /// Config could not be written out as JSON.
    Serialize(String),
    /// No editor is configured for the column.
    UnknownColumn(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "IO error: {msg}"),
            Self::Parse(msg) => write!(f, "config parse error: {msg}"),
            Self::Serialize(msg) => write!(f, "config serialize error: {msg}"),
            Self::UnknownColumn(id) => write!(f, "no editor configured for column '{id}'"),
        }
    }
}

impl std::error::Error for ConfigError {}
