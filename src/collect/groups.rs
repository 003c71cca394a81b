//! Insertion-ordered grouping of occurrences by column and description.

use super::Occurrence;
use serde::Serialize;
use std::collections::HashMap;

/// All occurrences sharing one exact description text (possibly `""`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DescriptionVariant {
    pub text: String,
    pub occurrences: Vec<Occurrence>,
}

impl DescriptionVariant {
    pub fn count(&self) -> usize {
        self.occurrences.len()
    }

    pub fn is_empty_text(&self) -> bool {
        self.text.is_empty()
    }
}

/// Every description seen for one column name, in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnGroup {
    pub name: String,
    pub variants: Vec<DescriptionVariant>,
}

impl ColumnGroup {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            variants: Vec::new(),
        }
    }

    fn record(&mut self, text: &str, occurrence: Occurrence) {
        match self.variants.iter_mut().find(|v| v.text == text) {
            Some(variant) => variant.occurrences.push(occurrence),
            None => self.variants.push(DescriptionVariant {
                text: text.to_string(),
                occurrences: vec![occurrence],
            }),
        }
    }

    /// The variant with the given text, if any.
    #[cfg(test)]
    pub fn variant(&self, text: &str) -> Option<&DescriptionVariant> {
        self.variants.iter().find(|v| v.text == text)
    }

    /// Total number of occurrences across all variants.
    pub fn total(&self) -> usize {
        self.variants.iter().map(DescriptionVariant::count).sum()
    }

    pub fn has_non_empty(&self) -> bool {
        self.variants.iter().any(|v| !v.is_empty_text())
    }
}

/// Column name → description text → occurrences, in first-seen order.
///
/// Built once per run and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct DescriptionGroups {
    columns: Vec<ColumnGroup>,
    index: HashMap<String, usize>,
}

impl DescriptionGroups {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one occurrence of `occurrence.column` with description `text`.
    pub fn record(&mut self, text: &str, occurrence: Occurrence) {
        let idx = match self.index.get(&occurrence.column) {
            Some(&idx) => idx,
            None => {
                self.columns.push(ColumnGroup::new(&occurrence.column));
                let idx = self.columns.len() - 1;
                self.index.insert(occurrence.column.clone(), idx);
                idx
            }
        };
        self.columns[idx].record(text, occurrence);
    }

    #[cfg(test)]
    pub fn get(&self, column: &str) -> Option<&ColumnGroup> {
        self.index.get(column).map(|&idx| &self.columns[idx])
    }

    pub fn iter(&self) -> impl Iterator<Item = &ColumnGroup> {
        self.columns.iter()
    }

    /// Number of distinct column names.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
