//! The colsync run: scan, reconcile, report, and optionally fix.
//!
//! A run never aborts on a single bad file. Parse failures drop that file
//! from the scan; lookup misses and write failures drop that edit or file
//! from the fix. All of them are logged and counted in the report.


use crate::cli::{Cli, OutputFormat};
use crate::collect::collect;
use crate::config::Config;
use crate::context::{ScanContext, resolve_root};
use crate::error::Result;
use crate::fs::discover_schema_files;
use crate::patch::{PatchOutcome, patch_file};
use crate::reconcile::{ReconcilePlan, plan};
use crate::report::{RunReport, render_json, render_text};
use std::path::{Path, PathBuf};

/// Everything one run produced.
#[derive(Debug)]
pub struct RunOutcome {
    pub models_dir: PathBuf,
    pub files_scanned: usize,
    pub parse_failures: Vec<String>,
    pub plan: ReconcilePlan,
    pub fix: bool,
    pub patches: Vec<PatchOutcome>,
    pub write_failures: Vec<String>,
}

impl RunOutcome {
    pub fn report(&self) -> RunReport<'_> {
        let mut report = RunReport::new(&self.models_dir, self.files_scanned, &self.plan);
        report.parse_failures = self.parse_failures.clone();
        report.fix = self.fix;
        report.patches = &self.patches;
        report.write_failures = self.write_failures.clone();
        report
    }
}

/// Run colsync for parsed command line arguments and print the report.
///
/// Returns whether the tree is consistent after the run.
pub fn dispatch(args: &Cli) -> Result<bool> {
    let root = resolve_root(&args.dir)?;
    let config = Config::resolve(args.config.as_deref(), &root)?;

    let outcome = run(&root, &config, args.fix)?;
    let report = outcome.report();

    match args.format {
        OutputFormat::Text => print!("{}", render_text(&report)),
        OutputFormat::Json => println!("{}", render_json(&report)?),
    }

    Ok(report.is_consistent())
}

/// Scan the project at `root` and, when `fix` is set, apply the pending edits.
pub fn run(root: &Path, config: &Config, fix: bool) -> Result<RunOutcome> {
    let context = ScanContext::new(root.to_path_buf(), config)?;
    let files = discover_schema_files(&context.models_dir, config)?;
    tracing::info!(
        files = files.len(),
        models_dir = %context.models_dir.display(),
        "discovered schema files"
    );

    let collection = collect(&files);
    let plan = plan(&collection.groups);

    let mut outcome = RunOutcome {
        models_dir: context.models_dir,
        files_scanned: files.len(),
        parse_failures: collection.failures.iter().map(|e| e.to_string()).collect(),
        plan,
        fix,
        patches: Vec::new(),
        write_failures: Vec::new(),
    };

    if fix {
        apply_plan(&mut outcome, config.indent_width);
    }

    Ok(outcome)
}

/// Patch every file with pending edits, continuing past failures.
fn apply_plan(outcome: &mut RunOutcome, indent_width: usize) {
    for file_edits in &outcome.plan.files {
        match patch_file(file_edits, indent_width) {
            Ok(patch) => outcome.patches.push(patch),
            Err(err) => {
                tracing::error!("{}", err);
                outcome.write_failures.push(err.to_string());
            }
        }
    }
}
