//! `celledit-engine`: in-place cell editing for grids.
//!
//! The generic [`CellEditor`] owns an edit session: it decides which
//! keystrokes the cell input accepts, whether the edit is cancelled before it
//! starts or treated as unchanged after it ends, and converts input text to a
//! typed value through an [`EditorPolicy`]. [`DateCellEditor`] is the bundled
//! concrete editor. No GUI dependencies; [`EditHost`] drives an editor
//! headlessly.

pub mod classify;
pub mod controller;
pub mod date;
pub mod deferred;
pub mod error;
pub mod host;
pub mod key;
pub mod policy;
pub mod session;
pub mod text_field;
pub mod value;

pub use classify::KeyAction;
pub use controller::{CellEditor, EditOutcome, GridCellEditor};
pub use date::DateCellEditor;
pub use deferred::{DeferredQueue, EditorInput, FocusTask};
pub use error::EditorError;
pub use host::{EditHost, HostOutcome, KeyRecord};
pub use key::Key;
pub use policy::{CharSet, EditorPolicy};
pub use session::EditParams;
pub use text_field::{FieldAction, TextField};
pub use value::{CellInput, EditorOptions, OptionValue};
