//! Recursive discovery of schema files under the models directory.

use crate::config::Config;
use crate::error::Result;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// List every schema file under `models_dir`, recursively.
///
/// A file qualifies when its extension is one of the configured extensions
/// (case-insensitive) and its path relative to `models_dir` matches none of
/// the `exclude` globs. Paths are sorted by file name within each directory
/// so discovery order is stable across platforms.
pub fn discover_schema_files(models_dir: &Path, config: &Config) -> Result<Vec<PathBuf>> {
    let extensions = config.normalized_extensions();
    let exclude = config.exclude_set()?;

    let mut files = Vec::new();
    for entry in WalkDir::new(models_dir).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable directory entry");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        if !has_schema_extension(path, &extensions) {
            continue;
        }

        let relative = path.strip_prefix(models_dir).unwrap_or(path);
        if exclude.is_match(relative) {
            tracing::debug!(path = %path.display(), "excluded by config");
            continue;
        }

        files.push(path.to_path_buf());
    }

    Ok(files)
}

fn has_schema_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}
