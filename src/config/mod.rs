//! Configuration model for colsync.
//!
//! This module defines the Config struct that represents the optional
//! `.colsync.yaml` settings file at the project root. It supports
//! forward-compatible YAML parsing (unknown fields are ignored), sensible
//! defaults for every field, and validation of config values.

mod model;
mod operations;

#[cfg(test)]
mod tests;

// Re-export public API
pub use model::{CONFIG_FILE_NAME, Config};
