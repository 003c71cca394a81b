//! In-place description patching on raw schema text.
//!
//! Decisions are made on the parsed schema, but edits are applied to the
//! file's raw lines so comments and formatting elsewhere survive. Every edit
//! re-resolves its target from scratch against the current buffer: an
//! earlier insertion in the same file shifts every later line index.
//!
//! For one edit the lookup chain is
//! `models:`/`sources:` → `- name: <parent>` → (`tables:` → `- name: <table>`)
//! → `columns:` → `- name: <column>` → `description:`.
//!
//! An existing `description:` line keeps its indentation and key and gets a
//! new double-quoted value. Anything after the original colon, including an
//! inline comment and any continuation lines of a multi-line value, is
//! replaced. A column without a description gets a new line directly below
//! its `- name:` line.

mod buffer;
mod scalar;
mod scan;


pub use buffer::LineBuffer;

use scalar::quote;
use scan::{Child, block_end, find_child, find_key_line, indent_of};

use crate::collect::{Occurrence, OccurrenceKind};
use crate::error::{ColsyncError, Result};
use crate::fs::atomic_write_file;
use crate::reconcile::{Edit, FileEdits};
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// A structural element an edit could not be relocated to.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "missing", rename_all = "snake_case")]
pub enum LookupMiss {
    #[error("could not find '{key}:'")]
    RootKey { key: String },

    #[error("{kind} has no name and cannot be located")]
    UnnamedEntry { kind: OccurrenceKind },

    #[error("could not find {kind} '{name}'")]
    Entry { kind: OccurrenceKind, name: String },

    #[error("could not find 'tables:' in source '{source_name}'")]
    TablesKey { source_name: String },

    #[error("table has no name and cannot be located")]
    UnnamedTable,

    #[error("could not find table '{name}'")]
    Table { name: String },

    #[error("could not find 'columns:' under '{owner}'")]
    ColumnsKey { owner: String },

    #[error("could not find column '{name}'")]
    Column { name: String },
}

/// How an applied edit changed the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "action", content = "line", rename_all = "snake_case")]
pub enum EditAction {
    /// The `description:` line at this index was rewritten.
    Replaced(usize),
    /// A `description:` line was inserted at this index.
    Inserted(usize),
}

/// An edit that could not be applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedEdit {
    pub column: String,
    pub miss: LookupMiss,
}

/// Result of patching one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatchOutcome {
    pub file: PathBuf,
    pub applied: usize,
    pub skipped: Vec<SkippedEdit>,
    /// Whether the file was rewritten (at least one edit applied).
    pub written: bool,
}

/// Locate the `- name:` line of the column an occurrence points at.
pub fn locate_column(
    buffer: &LineBuffer,
    target: &Occurrence,
) -> std::result::Result<usize, LookupMiss> {
    let root_key = target.kind.root_key();
    let root = find_key_line(buffer, root_key).ok_or_else(|| LookupMiss::RootKey {
        key: root_key.to_string(),
    })?;

    let parent_name = target
        .parent
        .as_deref()
        .ok_or(LookupMiss::UnnamedEntry { kind: target.kind })?;
    let mut owner = find_child(buffer, root, Child::Named(parent_name)).ok_or_else(|| {
        LookupMiss::Entry {
            kind: target.kind,
            name: parent_name.to_string(),
        }
    })?;
    let mut owner_name = parent_name;

    if target.kind == OccurrenceKind::Source {
        let tables = find_child(buffer, owner, Child::Key("tables")).ok_or_else(|| {
            LookupMiss::TablesKey {
                source_name: parent_name.to_string(),
            }
        })?;
        let table_name = target.table.as_deref().ok_or(LookupMiss::UnnamedTable)?;
        owner = find_child(buffer, tables, Child::Named(table_name)).ok_or_else(|| {
            LookupMiss::Table {
                name: table_name.to_string(),
            }
        })?;
        owner_name = table_name;
    }

    let columns = find_child(buffer, owner, Child::Key("columns")).ok_or_else(|| {
        LookupMiss::ColumnsKey {
            owner: owner_name.to_string(),
        }
    })?;

    find_child(buffer, columns, Child::Named(&target.column)).ok_or_else(|| LookupMiss::Column {
        name: target.column.clone(),
    })
}

/// Apply one edit to the buffer.
pub fn apply_edit(
    buffer: &mut LineBuffer,
    edit: &Edit,
    indent_width: usize,
) -> std::result::Result<EditAction, LookupMiss> {
    let column = locate_column(buffer, &edit.target)?;
    let value = quote(&edit.new_description);

    match find_child(buffer, column, Child::Key("description")) {
        Some(line) => {
            replace_description(buffer, line, &value);
            Ok(EditAction::Replaced(line))
        }
        None => {
            let indent = indent_of(buffer.content(column)) + indent_width;
            let new_line = format!("{}description: {}", " ".repeat(indent), value);
            buffer.insert_after(column, &new_line);
            Ok(EditAction::Inserted(column + 1))
        }
    }
}

/// Rewrite a `description:` line and drop the continuation lines of its old value.
fn replace_description(buffer: &mut LineBuffer, line: usize, value: &str) {
    let end = block_end(buffer, line);
    if end > line + 1 {
        buffer.remove_range(line + 1, end);
    }

    let content = buffer.content(line);
    let key_part = content.split_once(':').map_or(content, |(key, _)| key);
    let new_content = format!("{}: {}", key_part, value);
    buffer.replace(line, &new_content);
}

/// Apply a batch of edits to a buffer, in order.
///
/// Returns the number of applied edits and the edits that were skipped.
pub fn apply_edits(
    buffer: &mut LineBuffer,
    edits: &[Edit],
    indent_width: usize,
) -> (usize, Vec<SkippedEdit>) {
    let mut applied = 0;
    let mut skipped = Vec::new();

    for edit in edits {
        match apply_edit(buffer, edit, indent_width) {
            Ok(action) => {
                tracing::debug!(column = %edit.target.column, ?action, "applied edit");
                applied += 1;
            }
            Err(miss) => {
                tracing::warn!(
                    file = %edit.target.file.display(),
                    column = %edit.target.column,
                    "{}",
                    miss
                );
                skipped.push(SkippedEdit {
                    column: edit.target.column.clone(),
                    miss,
                });
            }
        }
    }

    (applied, skipped)
}

/// Apply all pending edits of one file and write it back if anything changed.
///
/// The file is left untouched when no edit could be applied. Read and write
/// failures are returned as [`ColsyncError::WriteError`].
pub fn patch_file(file_edits: &FileEdits, indent_width: usize) -> Result<PatchOutcome> {
    let path = &file_edits.file;
    let text = std::fs::read_to_string(path).map_err(|e| ColsyncError::WriteError {
        path: path.clone(),
        message: format!("failed to read: {}", e),
    })?;

    let mut buffer = LineBuffer::from_text(&text);
    let (applied, skipped) = apply_edits(&mut buffer, &file_edits.edits, indent_width);

    let written = applied > 0;
    if written {
        atomic_write_file(path, &buffer.to_text())?;
        tracing::info!(file = %path.display(), applied, "updated file");
    }

    Ok(PatchOutcome {
        file: path.clone(),
        applied,
        skipped,
        written,
    })
}
