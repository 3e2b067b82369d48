//! CLI Exit Code Registry
//!
//! Exit codes are part of the shell contract; scripts rely on them.
//!
//! | Code | Meaning                                          |
//! |------|--------------------------------------------------|
//! | 0    | Success                                          |
//! | 1    | General error (editor contract violation)        |
//! | 2    | CLI usage error (bad key, missing column)        |
//! | 3    | Config / IO error (unreadable or invalid config) |
//!
//! An edit that ends cancelled, discarded or unchanged is still a success:
//! the outcome is reported on stdout, not through the exit code.

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - the editor refused an operation.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, unknown key or column.
pub const EXIT_USAGE: u8 = 2;

/// Config file missing, unreadable or malformed.
pub const EXIT_CONFIG: u8 = 3;
