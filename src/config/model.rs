//! Config struct definition and default implementation.

use serde::{Deserialize, Serialize};

/// File name of the implicit settings file looked up at the project root.
pub const CONFIG_FILE_NAME: &str = ".colsync.yaml";

/// Settings for a colsync run.
///
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory under the project root that holds schema files.
    #[serde(default = "default_models_dir")]
    pub models_dir: String,

    /// Recognized schema file extensions (no leading dots).
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Glob patterns, relative to the models directory, of files to skip.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Extra indentation of an inserted `description:` line relative to
    /// its column's `- name:` line.
    #[serde(default = "default_indent_width")]
    pub indent_width: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            models_dir: default_models_dir(),
            extensions: default_extensions(),
            exclude: Vec::new(),
            indent_width: default_indent_width(),
        }
    }
}

pub(super) fn default_models_dir() -> String {
    "models".to_string()
}

pub(super) fn default_extensions() -> Vec<String> {
    vec!["yml".to_string(), "yaml".to_string()]
}

fn default_indent_width() -> usize {
    2
}
