//! Reconciliation policy: which description wins, and what must change.
//!
//! A column is inconsistent when it has more than one distinct description
//! (the empty description counts as one) and at least one of them is
//! non-empty. The canonical description is the non-empty text with the most
//! occurrences; ties go to the text seen first. Every occurrence carrying any
//! other text, including none, gets a pending edit.


use crate::collect::{ColumnGroup, DescriptionGroups, DescriptionVariant, Occurrence};
use serde::Serialize;
use std::path::PathBuf;

/// One column whose descriptions disagree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Inconsistency {
    pub column: String,
    pub canonical: String,
    pub canonical_count: usize,
    /// Every other description, in first-seen order.
    pub others: Vec<DescriptionVariant>,
}

/// A pending change of one column's description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edit {
    pub target: Occurrence,
    pub new_description: String,
}

/// All pending edits of one file, in discovery order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileEdits {
    pub file: PathBuf,
    pub edits: Vec<Edit>,
}

/// Outcome of reconciling a full set of description groups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconcilePlan {
    pub inconsistencies: Vec<Inconsistency>,
    /// Files in order of their first pending edit.
    pub files: Vec<FileEdits>,
}

impl ReconcilePlan {
    pub fn is_consistent(&self) -> bool {
        self.inconsistencies.is_empty()
    }

    /// Total number of pending edits across all files.
    pub fn edit_count(&self) -> usize {
        self.files.iter().map(|f| f.edits.len()).sum()
    }

    fn push_edit(&mut self, edit: Edit) {
        match self.files.iter_mut().find(|f| f.file == edit.target.file) {
            Some(bucket) => bucket.edits.push(edit),
            None => self.files.push(FileEdits {
                file: edit.target.file.clone(),
                edits: vec![edit],
            }),
        }
    }
}

/// Pick the canonical description of a column group.
///
/// Returns `None` when the group has no non-empty description.
pub fn choose_canonical(group: &ColumnGroup) -> Option<&DescriptionVariant> {
    // max_by_key keeps the last maximum, so compare in reverse order to keep the first.
    group
        .variants
        .iter()
        .filter(|v| !v.is_empty_text())
        .rev()
        .max_by_key(|v| v.count())
}

/// Reconcile every column group into a report and a set of pending edits.
pub fn plan(groups: &DescriptionGroups) -> ReconcilePlan {
    let mut plan = ReconcilePlan::default();

    for group in groups.iter() {
        if group.variants.len() < 2 || !group.has_non_empty() {
            continue;
        }
        let Some(canonical) = choose_canonical(group) else {
            continue;
        };

        let others: Vec<DescriptionVariant> = group
            .variants
            .iter()
            .filter(|v| v.text != canonical.text)
            .cloned()
            .collect();

        for variant in &others {
            for occurrence in &variant.occurrences {
                plan.push_edit(Edit {
                    target: occurrence.clone(),
                    new_description: canonical.text.clone(),
                });
            }
        }

        tracing::debug!(
            column = %group.name,
            canonical = %canonical.text,
            uses = canonical.count(),
            total = group.total(),
            "inconsistent column"
        );
        plan.inconsistencies.push(Inconsistency {
            column: group.name.clone(),
            canonical: canonical.text.clone(),
            canonical_count: canonical.count(),
            others,
        });
    }

    plan
}
