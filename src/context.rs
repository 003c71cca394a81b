//! Project root resolution for colsync.
//!
//! The scan root is the dbt project directory given on the command line.
//! When that directory does not exist but the current working directory
//! looks like a dbt project itself (it has a `models/` directory), the
//! working directory is used instead.

use crate::config::Config;
use crate::error::{ColsyncError, Result};
use std::env;
use std::path::{Path, PathBuf};

/// Directory whose presence marks the working directory as a project root.
pub const PROJECT_MARKER_DIR: &str = "models";

/// Resolved paths for a colsync run.
#[derive(Debug, Clone)]
pub struct ScanContext {
    /// The project root (where `.colsync.yaml` is looked up).
    pub root: PathBuf,

    /// The directory scanned recursively for schema files.
    pub models_dir: PathBuf,
}

impl ScanContext {
    /// Build the context for a resolved root, requiring the models directory to exist.
    pub fn new(root: PathBuf, config: &Config) -> Result<Self> {
        let models_dir = root.join(&config.models_dir);
        if !models_dir.is_dir() {
            return Err(ColsyncError::UserError(format!(
                "Directory not found: {}",
                models_dir.display()
            )));
        }

        Ok(Self { root, models_dir })
    }
}

/// Resolve the project root from the requested directory and the process cwd.
pub fn resolve_root(requested: &Path) -> Result<PathBuf> {
    let cwd = env::current_dir().map_err(|e| {
        ColsyncError::UserError(format!("failed to get current working directory: {}", e))
    })?;

    Ok(resolve_root_from(requested, &cwd))
}

/// Resolve the project root relative to a known working directory.
///
/// The requested directory wins whenever it exists. Otherwise `cwd` is used
/// if it contains [`PROJECT_MARKER_DIR`]; failing that, the requested path is
/// returned unchanged so the caller reports it as missing.
pub fn resolve_root_from(requested: &Path, cwd: &Path) -> PathBuf {
    let candidate = if requested.is_absolute() {
        requested.to_path_buf()
    } else {
        cwd.join(requested)
    };

    if candidate.exists() {
        return candidate;
    }

    if cwd.join(PROJECT_MARKER_DIR).is_dir() {
        tracing::info!(
            requested = %requested.display(),
            cwd = %cwd.display(),
            "requested directory missing, scanning the working directory instead"
        );
        return cwd.to_path_buf();
    }

    candidate
}
