//! Column description collection.
//!
//! Walks every schema file and groups column occurrences by column name and
//! then by description text. Both levels keep first-seen order (file
//! discovery order, then document order), which the reconciler relies on
//! for tie-breaking.

mod groups;


pub use groups::{ColumnGroup, DescriptionGroups, DescriptionVariant};

use crate::error::ColsyncError;
use crate::schema::{Column, SchemaFile};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Which top-level collection an occurrence lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OccurrenceKind {
    /// `models[].columns[]`
    Model,
    /// `sources[].tables[].columns[]`
    Source,
}

impl OccurrenceKind {
    /// The top-level key holding entries of this kind.
    pub fn root_key(self) -> &'static str {
        match self {
            OccurrenceKind::Model => "models",
            OccurrenceKind::Source => "sources",
        }
    }
}

impl fmt::Display for OccurrenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OccurrenceKind::Model => write!(f, "model"),
            OccurrenceKind::Source => write!(f, "source"),
        }
    }
}

/// The location of one column inside one schema file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Occurrence {
    pub file: PathBuf,
    pub kind: OccurrenceKind,
    /// Name of the owning model or source (`None` when the entry has no name).
    pub parent: Option<String>,
    /// Name of the owning source table; always `None` for models.
    pub table: Option<String>,
    pub column: String,
}

impl fmt::Display for Occurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parent = self.parent.as_deref().unwrap_or("<unnamed>");
        write!(f, "{} ({}: {}", self.file.display(), self.kind, parent)?;
        if self.kind == OccurrenceKind::Source {
            write!(f, ".{}", self.table.as_deref().unwrap_or("<unnamed>"))?;
        }
        write!(f, ")")
    }
}

/// Result of collecting over a set of schema files.
#[derive(Debug, Default)]
pub struct Collection {
    pub groups: DescriptionGroups,
    /// Number of files that were read and parsed.
    pub files_parsed: usize,
    /// Files that could not be read or parsed; they contribute nothing.
    pub failures: Vec<ColsyncError>,
}

/// Collect column descriptions from every file, in order.
///
/// A file that cannot be read or parsed is logged, recorded in
/// [`Collection::failures`], and skipped.
pub fn collect(files: &[PathBuf]) -> Collection {
    let mut collection = Collection::default();

    for path in files {
        match SchemaFile::load(path) {
            Ok(Some(schema)) => {
                collect_document(path, &schema, &mut collection.groups);
                collection.files_parsed += 1;
            }
            Ok(None) => {
                tracing::debug!(path = %path.display(), "no mapping at top level, skipping");
                collection.files_parsed += 1;
            }
            Err(err) => {
                tracing::warn!("{}", err);
                collection.failures.push(err);
            }
        }
    }

    tracing::info!(
        files = collection.files_parsed,
        failures = collection.failures.len(),
        columns = collection.groups.len(),
        "collected column descriptions"
    );
    collection
}

/// Record every addressable column of one parsed document.
pub fn collect_document(path: &Path, schema: &SchemaFile, groups: &mut DescriptionGroups) {
    for model in &schema.models {
        for column in &model.columns {
            record_column(
                groups,
                path,
                OccurrenceKind::Model,
                model.name.as_deref(),
                None,
                column,
            );
        }
    }

    for source in &schema.sources {
        for table in &source.tables {
            for column in &table.columns {
                record_column(
                    groups,
                    path,
                    OccurrenceKind::Source,
                    source.name.as_deref(),
                    table.name.as_deref(),
                    column,
                );
            }
        }
    }
}

fn record_column(
    groups: &mut DescriptionGroups,
    path: &Path,
    kind: OccurrenceKind,
    parent: Option<&str>,
    table: Option<&str>,
    column: &Column,
) {
    // Columns without a name cannot be addressed.
    let Some(name) = column.name.as_deref().filter(|n| !n.is_empty()) else {
        return;
    };

    let occurrence = Occurrence {
        file: path.to_path_buf(),
        kind,
        parent: parent.map(str::to_string),
        table: table.map(str::to_string),
        column: name.to_string(),
    };
    groups.record(column.description_text(), occurrence);
}
