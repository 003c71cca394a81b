//! Config loading, validation, and utility operations.

use super::model::{CONFIG_FILE_NAME, Config};
use crate::error::{ColsyncError, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::Path;

impl Config {
    /// Load config from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            ColsyncError::UserError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Resolve the settings for a run.
    ///
    /// An explicit path must exist. Without one, `<root>/.colsync.yaml` is
    /// loaded when present and defaults are used otherwise.
    pub fn resolve(explicit: Option<&Path>, root: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let implicit = root.join(CONFIG_FILE_NAME);
        if implicit.is_file() {
            tracing::debug!(path = %implicit.display(), "loading settings file");
            Self::load(implicit)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse config from a YAML string.
    ///
    /// An empty document yields the defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = if yaml.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(yaml).map_err(|e| {
                ColsyncError::UserError(format!("failed to parse config YAML: {}", e))
            })?
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate config values and return error on invalid values.
    ///
    /// Validation rules:
    /// - `models_dir` must be non-empty
    /// - `extensions` must be non-empty, entries non-empty without leading dots
    /// - `exclude` entries must be valid globs
    /// - `indent_width` must be positive
    pub fn validate(&self) -> Result<()> {
        if self.models_dir.trim().is_empty() {
            return Err(ColsyncError::UserError(
                "config validation failed: models_dir must be non-empty".to_string(),
            ));
        }

        if self.extensions.is_empty() {
            return Err(ColsyncError::UserError(
                "config validation failed: extensions must list at least one suffix".to_string(),
            ));
        }

        for ext in &self.extensions {
            if ext.is_empty() {
                return Err(ColsyncError::UserError(
                    "config validation failed: extensions entries must be non-empty".to_string(),
                ));
            }
            if ext.starts_with('.') {
                return Err(ColsyncError::UserError(format!(
                    "config validation failed: extensions entries must not have leading dots (found '{}'). Use '{}' instead.",
                    ext,
                    ext.trim_start_matches('.')
                )));
            }
        }

        if self.indent_width == 0 {
            return Err(ColsyncError::UserError(
                "config validation failed: indent_width must be greater than 0".to_string(),
            ));
        }

        self.exclude_set()?;
        Ok(())
    }

    /// Get extensions normalized to lowercase.
    pub fn normalized_extensions(&self) -> Vec<String> {
        self.extensions.iter().map(|s| s.to_lowercase()).collect()
    }

    /// Compile the `exclude` patterns into a matcher.
    pub fn exclude_set(&self) -> Result<GlobSet> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &self.exclude {
            let glob = Glob::new(pattern).map_err(|e| {
                ColsyncError::UserError(format!(
                    "config validation failed: invalid exclude pattern '{}': {}",
                    pattern, e
                ))
            })?;
            builder.add(glob);
        }
        builder.build().map_err(|e| {
            ColsyncError::UserError(format!("failed to compile exclude patterns: {}", e))
        })
    }
}
