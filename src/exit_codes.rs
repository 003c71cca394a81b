//! Exit code constants for the colsync CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, missing root directory, invalid config)
//! - 2: Inconsistencies remain (only reported with `--strict`)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, missing directory, or invalid configuration.
pub const USER_ERROR: i32 = 1;

/// Inconsistent descriptions remain after the run (`--strict` only).
pub const INCONSISTENT: i32 = 2;
