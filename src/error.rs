//! Error types for the colsync CLI.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.

use crate::exit_codes;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for colsync operations.
///
/// Per-file failures (`ParseError`, `WriteError`) are reported and skipped by
/// the command layer; only `UserError` ends a run.
#[derive(Error, Debug)]
pub enum ColsyncError {
    /// User provided invalid arguments or the environment is in an invalid state.
    #[error("{0}")]
    UserError(String),

    /// A schema file could not be parsed.
    #[error("failed to parse '{}': {message}", path.display())]
    ParseError { path: PathBuf, message: String },

    /// A patched schema file could not be written back.
    #[error("failed to update '{}': {message}", path.display())]
    WriteError { path: PathBuf, message: String },
}

impl ColsyncError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            ColsyncError::UserError(_) => exit_codes::USER_ERROR,
            ColsyncError::ParseError { .. } => exit_codes::USER_ERROR,
            ColsyncError::WriteError { .. } => exit_codes::USER_ERROR,
        }
    }
}

/// Result type alias for colsync operations.
pub type Result<T> = std::result::Result<T, ColsyncError>;
