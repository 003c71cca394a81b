//! Atomic file writes for patched schema files.
//!
//! All writes follow this pattern:
//! 1. Write content to a temporary file in the same directory
//! 2. Sync the file to disk (fsync)
//! 3. Rename the temporary file over the target
//!
//! A schema file is therefore either fully patched or left as it was.
//! On crash, a temporary file named `.{filename}.tmp` may remain next to
//! the target; it never carries a schema extension so discovery skips it.

use crate::error::{ColsyncError, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Atomically replace `path` with `content`.
///
/// Failures are returned as [`ColsyncError::WriteError`] naming `path`.
pub fn atomic_write_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    let path = path.as_ref();
    let temp_path = generate_temp_path(path)?;

    write_and_sync(path, &temp_path, content.as_bytes())?;
    replace(path, &temp_path)
}

fn write_error(path: &Path, message: String) -> ColsyncError {
    ColsyncError::WriteError {
        path: path.to_path_buf(),
        message,
    }
}

/// Generate a temporary file path in the same directory as the target.
fn generate_temp_path(target: &Path) -> Result<PathBuf> {
    let parent = target.parent().unwrap_or(Path::new("."));
    let filename = target
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| write_error(target, "invalid file path".to_string()))?;

    Ok(parent.join(format!(".{}.tmp", filename)))
}

/// Write content to the temporary file and sync it to disk.
fn write_and_sync(target: &Path, temp_path: &Path, content: &[u8]) -> Result<()> {
    let mut file = File::create(temp_path).map_err(|e| {
        write_error(
            target,
            format!(
                "failed to create temporary file '{}': {}",
                temp_path.display(),
                e
            ),
        )
    })?;

    file.write_all(content)
        .and_then(|()| file.sync_all())
        .map_err(|e| {
            let _ = fs::remove_file(temp_path);
            write_error(target, format!("failed to write temporary file: {}", e))
        })
}

/// Rename the temporary file over the target.
fn replace(target: &Path, temp_path: &Path) -> Result<()> {
    fs::rename(temp_path, target).map_err(|e| {
        let _ = fs::remove_file(temp_path);
        write_error(target, format!("failed to replace file: {}", e))
    })?;

    sync_parent_dir(target);
    Ok(())
}

/// Persist the directory entry of a replaced file.
#[cfg(unix)]
fn sync_parent_dir(target: &Path) {
    if let Some(parent) = target.parent()
        && let Ok(dir) = File::open(parent)
    {
        let _ = dir.sync_all();
    }
}

#[cfg(not(unix))]
fn sync_parent_dir(_target: &Path) {}
