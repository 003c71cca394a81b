//! Typed view of a dbt schema file.
//!
//! Only the parts colsync reads are modelled: `models[].columns[]` and
//! `sources[].tables[].columns[]`, each column with its `name` and optional
//! `description`. Unknown keys are ignored. Names and descriptions given as
//! non-string scalars (numbers, booleans) are normalized to strings; a null
//! description is the same as a missing one.
//!
//! # Document shape
//!
//! ```text
//! models:
//!   - name: orders
//!     columns:
//!       - name: status
//!         description: "order status"
//! sources:
//!   - name: raw
//!     tables:
//!       - name: orders
//!         columns:
//!           - name: status
//! ```

use crate::error::{ColsyncError, Result};
use serde::de::{Deserializer, Error as _};
use serde::Deserialize;
use serde_yaml::Value;
use std::path::Path;

/// A parsed schema file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SchemaFile {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub models: Vec<Model>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub sources: Vec<Source>,
}

/// A `models:` entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Model {
    #[serde(default, deserialize_with = "scalar_string")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub columns: Vec<Column>,
}

/// A `sources:` entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Source {
    #[serde(default, deserialize_with = "scalar_string")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub tables: Vec<Table>,
}

/// A table inside a source entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Table {
    #[serde(default, deserialize_with = "scalar_string")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub columns: Vec<Column>,
}

/// A column of a model or source table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Column {
    #[serde(default, deserialize_with = "scalar_string")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "scalar_string")]
    pub description: Option<String>,
}

impl Column {
    /// The description text, with a missing description read as `""`.
    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }
}

impl SchemaFile {
    /// Parse a schema file from its content.
    ///
    /// Returns `Ok(None)` for documents with nothing to read: an empty or
    /// null document, or a top level that is not a mapping.
    pub fn parse(content: &str) -> std::result::Result<Option<Self>, serde_yaml::Error> {
        let value: Value = serde_yaml::from_str(content)?;
        if !value.is_mapping() {
            return Ok(None);
        }
        serde_yaml::from_value(value).map(Some)
    }

    /// Load and parse a schema file from disk.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        let content = std::fs::read_to_string(path).map_err(|e| ColsyncError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Self::parse(&content).map_err(|e| ColsyncError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

fn scalar_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(value) = Option::<Value>::deserialize(deserializer)? else {
        return Ok(None);
    };
    match value {
        Value::Sequence(_) => Err(D::Error::custom("expected a scalar, found a sequence")),
        Value::Mapping(_) => Err(D::Error::custom("expected a scalar, found a mapping")),
        Value::Tagged(_) => Err(D::Error::custom("expected a scalar, found a tagged value")),
        scalar => Ok(scalar_text(&scalar)),
    }
}

/// The string form of a scalar field value; `None` for null and non-scalars.
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Read the raw text of a single `key: value` value the way a parsed field is read.
///
/// Quoting, escapes, and trailing comments follow YAML rules, so the result
/// matches what [`SchemaFile::parse`] produced for the same line.
pub fn read_scalar(raw: &str) -> Option<String> {
    let value: Value = serde_yaml::from_str(raw).ok()?;
    scalar_text(&value)
}
