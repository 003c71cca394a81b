//! Tests for config functionality.

use super::model::{default_extensions, default_models_dir};
use crate::config::{CONFIG_FILE_NAME, Config};
use crate::error::ColsyncError;
use std::path::Path;
use tempfile::TempDir;

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.models_dir, "models");
    assert_eq!(config.extensions, vec!["yml", "yaml"]);
    assert!(config.exclude.is_empty());
    assert_eq!(config.indent_width, 2);
}

#[test]
fn test_parse_minimal_yaml() {
    let config = Config::from_yaml("").unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_parse_partial_yaml() {
    let yaml = r#"
exclude:
  - "staging/legacy/**"
indent_width: 4
"#;
    let config = Config::from_yaml(yaml).unwrap();

    assert_eq!(config.exclude, vec!["staging/legacy/**"]);
    assert_eq!(config.indent_width, 4);

    // Unspecified values should use defaults
    assert_eq!(config.models_dir, default_models_dir());
    assert_eq!(config.extensions, default_extensions());
}

#[test]
fn test_unknown_fields_are_ignored() {
    let yaml = r#"
models_dir: marts
future_option: true
"#;
    let config = Config::from_yaml(yaml).unwrap();
    assert_eq!(config.models_dir, "marts");
}

#[test]
fn test_invalid_yaml_is_user_error() {
    let err = Config::from_yaml("extensions: [yml").unwrap_err();
    assert!(matches!(err, ColsyncError::UserError(_)));
    assert!(err.to_string().contains("failed to parse config YAML"));
}

#[test]
fn test_validate_rejects_zero_indent() {
    let err = Config::from_yaml("indent_width: 0").unwrap_err();
    assert!(err.to_string().contains("indent_width"));
}

#[test]
fn test_validate_rejects_leading_dot_extension() {
    let err = Config::from_yaml("extensions: [.yml]").unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("leading dots"));
    assert!(msg.contains("Use 'yml' instead"));
}

#[test]
fn test_validate_rejects_empty_extension_list() {
    let err = Config::from_yaml("extensions: []").unwrap_err();
    assert!(err.to_string().contains("at least one suffix"));
}

#[test]
fn test_validate_rejects_bad_glob() {
    let err = Config::from_yaml("exclude: ['a/[b']").unwrap_err();
    assert!(err.to_string().contains("invalid exclude pattern"));
}

#[test]
fn test_normalized_extensions() {
    let config = Config {
        extensions: vec!["YML".to_string(), "Yaml".to_string()],
        ..Default::default()
    };
    assert_eq!(config.normalized_extensions(), vec!["yml", "yaml"]);
}

#[test]
fn test_exclude_set_matches_relative_paths() {
    let config = Config {
        exclude: vec!["legacy/**".to_string()],
        ..Default::default()
    };
    let set = config.exclude_set().unwrap();
    assert!(set.is_match(Path::new("legacy/old_schema.yml")));
    assert!(!set.is_match(Path::new("marts/schema.yml")));
}

#[test]
fn test_resolve_uses_defaults_without_file() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::resolve(None, temp_dir.path()).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_resolve_loads_implicit_file() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join(CONFIG_FILE_NAME), "models_dir: marts\n").unwrap();

    let config = Config::resolve(None, temp_dir.path()).unwrap();
    assert_eq!(config.models_dir, "marts");
}

#[test]
fn test_resolve_missing_explicit_file_is_error() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("nope.yaml");

    let err = Config::resolve(Some(&missing), temp_dir.path()).unwrap_err();
    assert!(err.to_string().contains("failed to read config file"));
}
