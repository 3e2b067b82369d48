// Configuration loading

pub mod editors;
pub mod error;

pub use editors::{ColumnEditor, EditorKind, EditorsConfig};
pub use error::ConfigError;
