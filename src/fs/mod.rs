//! Filesystem utilities for colsync.
//!
//! Schema file discovery and atomic writes for patched files.

pub mod atomic;
mod discover;

pub use atomic::atomic_write_file;
pub use discover::discover_schema_files;
