//! Rendering of run results.
//!
//! The text report goes to stdout; diagnostics (parse failures, lookup
//! misses, write failures) are logged separately through `tracing`.

use crate::error::{ColsyncError, Result};
use crate::patch::PatchOutcome;
use crate::reconcile::{Inconsistency, ReconcilePlan};
use serde::Serialize;
use std::fmt;
use std::path::Path;

/// Everything a run produced, in reportable form.
#[derive(Debug, Serialize)]
pub struct RunReport<'a> {
    pub models_dir: &'a Path,
    pub files_scanned: usize,
    pub parse_failures: Vec<String>,
    pub inconsistencies: &'a [Inconsistency],
    pub pending_edits: usize,
    pub fix: bool,
    pub patches: &'a [PatchOutcome],
    pub write_failures: Vec<String>,
}

impl<'a> RunReport<'a> {
    pub fn new(models_dir: &'a Path, files_scanned: usize, plan: &'a ReconcilePlan) -> Self {
        Self {
            models_dir,
            files_scanned,
            parse_failures: Vec::new(),
            inconsistencies: &plan.inconsistencies,
            pending_edits: plan.edit_count(),
            fix: false,
            patches: &[],
            write_failures: Vec::new(),
        }
    }

    /// Number of edits that were not applied (lookup misses).
    pub fn skipped_edits(&self) -> usize {
        self.patches.iter().map(|p| p.skipped.len()).sum()
    }

    /// Whether the tree is consistent after this run.
    ///
    /// A dry run is consistent only when nothing was found; a fix run when
    /// every pending edit was applied and written.
    pub fn is_consistent(&self) -> bool {
        if self.inconsistencies.is_empty() {
            return true;
        }
        self.fix
            && self.write_failures.is_empty()
            && self.skipped_edits() == 0
            && self.patches.iter().map(|p| p.applied).sum::<usize>() == self.pending_edits
    }
}

impl fmt::Display for RunReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Scanning {} files in {}...",
            self.files_scanned,
            self.models_dir.display()
        )?;

        for inconsistency in self.inconsistencies {
            writeln!(f)?;
            writeln!(f, "Inconsistency for '{}':", inconsistency.column)?;
            writeln!(
                f,
                "  Best description ({} uses): {:?}",
                inconsistency.canonical_count, inconsistency.canonical
            )?;
            for other in &inconsistency.others {
                writeln!(
                    f,
                    "  Other description ({} uses): {:?}",
                    other.count(),
                    other.text
                )?;
                for occurrence in &other.occurrences {
                    writeln!(f, "    - {}", occurrence)?;
                }
            }
        }

        writeln!(f)?;
        if self.inconsistencies.is_empty() {
            writeln!(f, "No inconsistencies found!")?;
        } else {
            writeln!(
                f,
                "Found {} columns with inconsistent descriptions.",
                self.inconsistencies.len()
            )?;
        }

        if !self.parse_failures.is_empty() {
            writeln!(
                f,
                "{} file(s) could not be read and were skipped.",
                self.parse_failures.len()
            )?;
        }

        if self.pending_edits == 0 {
            return Ok(());
        }
        if !self.fix {
            return writeln!(f, "Run with --fix to apply {} edit(s).", self.pending_edits);
        }

        writeln!(f)?;
        writeln!(f, "Applying fixes...")?;
        for patch in self.patches {
            if patch.written {
                writeln!(f, "Updated {} ({} edits)", patch.file.display(), patch.applied)?;
            }
            for skipped in &patch.skipped {
                writeln!(
                    f,
                    "  Warning: {} in {} (column '{}')",
                    skipped.miss,
                    patch.file.display(),
                    skipped.column
                )?;
            }
        }
        let skipped = self.skipped_edits();
        if skipped > 0 {
            writeln!(f, "{} edit(s) could not be applied.", skipped)?;
        }
        if !self.write_failures.is_empty() {
            writeln!(f, "{} file(s) could not be updated.", self.write_failures.len())?;
        }
        writeln!(f, "Fixes applied.")
    }
}

/// Render the human-readable report.
pub fn render_text(report: &RunReport<'_>) -> String {
    report.to_string()
}

/// Render the report as a JSON document.
pub fn render_json(report: &RunReport<'_>) -> Result<String> {
    serde_json::to_string_pretty(report)
        .map_err(|e| ColsyncError::UserError(format!("failed to serialize report: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collect::{DescriptionGroups, Occurrence, OccurrenceKind};
    use crate::patch::{LookupMiss, SkippedEdit};
    use crate::reconcile::plan;
    use std::path::PathBuf;

    fn sample_plan() -> ReconcilePlan {
        let mut groups = DescriptionGroups::new();
        groups.record(
            "order status",
            Occurrence {
                file: PathBuf::from("models/a.yml"),
                kind: OccurrenceKind::Model,
                parent: Some("orders".to_string()),
                table: None,
                column: "status".to_string(),
            },
        );
        groups.record(
            "",
            Occurrence {
                file: PathBuf::from("models/b.yml"),
                kind: OccurrenceKind::Source,
                parent: Some("raw".to_string()),
                table: Some("orders".to_string()),
                column: "status".to_string(),
            },
        );
        plan(&groups)
    }

    #[test]
    fn dry_run_text_lists_locations() {
        let plan = sample_plan();
        let report = RunReport::new(Path::new("models"), 2, &plan);
        let text = render_text(&report);

        assert!(text.starts_with("Scanning 2 files in models...\n"));
        assert!(text.contains("Inconsistency for 'status':\n"));
        assert!(text.contains("  Best description (1 uses): \"order status\"\n"));
        assert!(text.contains("  Other description (1 uses): \"\"\n"));
        assert!(text.contains("    - models/b.yml (source: raw.orders)\n"));
        assert!(text.contains("Found 1 columns with inconsistent descriptions.\n"));
        assert!(text.contains("Run with --fix to apply 1 edit(s)."));
        assert!(!report.is_consistent());
    }

    #[test]
    fn clean_run_says_so() {
        let plan = ReconcilePlan::default();
        let report = RunReport::new(Path::new("models"), 0, &plan);
        let text = render_text(&report);

        assert!(text.contains("No inconsistencies found!"));
        assert!(report.is_consistent());
    }

    #[test]
    fn fix_run_reports_updates_and_skips() {
        let plan = sample_plan();
        let patches = vec![PatchOutcome {
            file: PathBuf::from("models/b.yml"),
            applied: 0,
            skipped: vec![SkippedEdit {
                column: "status".to_string(),
                miss: LookupMiss::Table {
                    name: "orders".to_string(),
                },
            }],
            written: false,
        }];
        let mut report = RunReport::new(Path::new("models"), 2, &plan);
        report.fix = true;
        report.patches = &patches;

        let text = render_text(&report);
        assert!(text.contains("Applying fixes...\n"));
        assert!(text.contains(
            "  Warning: could not find table 'orders' in models/b.yml (column 'status')\n"
        ));
        assert!(text.contains("1 edit(s) could not be applied.\n"));
        assert!(!text.contains("Updated "));
        assert!(!report.is_consistent());
    }

    #[test]
    fn fully_applied_fix_is_consistent() {
        let plan = sample_plan();
        let patches = vec![PatchOutcome {
            file: PathBuf::from("models/b.yml"),
            applied: 1,
            skipped: Vec::new(),
            written: true,
        }];
        let mut report = RunReport::new(Path::new("models"), 2, &plan);
        report.fix = true;
        report.patches = &patches;

        assert!(render_text(&report).contains("Updated models/b.yml (1 edits)\n"));
        assert!(report.is_consistent());
    }

    #[test]
    fn write_failures_are_counted() {
        let plan = sample_plan();
        let mut report = RunReport::new(Path::new("models"), 2, &plan);
        report.fix = true;
        report.write_failures = vec!["failed to update 'models/b.yml': gone".to_string()];

        let text = render_text(&report);
        assert!(text.contains("1 file(s) could not be updated.\n"));
        assert!(text.ends_with("Fixes applied.\n"));
        assert!(!report.is_consistent());
    }

    #[test]
    fn json_report_is_structured() {
        let plan = sample_plan();
        let report = RunReport::new(Path::new("models"), 2, &plan);
        let json: serde_json::Value = serde_json::from_str(&render_json(&report).unwrap()).unwrap();

        assert_eq!(json["files_scanned"], 2);
        assert_eq!(json["pending_edits"], 1);
        assert_eq!(json["inconsistencies"][0]["column"], "status");
        assert_eq!(json["inconsistencies"][0]["canonical"], "order status");
        assert_eq!(
            json["inconsistencies"][0]["others"][0]["occurrences"][0]["kind"],
            "source"
        );
    }
}
