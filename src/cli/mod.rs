//! CLI argument parsing for colsync.
//!
//! Uses clap derive macros for declarative argument definitions.
//! The run itself lives in the `commands` module.

use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;

/// Default project directory scanned when no directory is given.
pub const DEFAULT_PROJECT_DIR: &str = "dbt";

/// Colsync: keep dbt column descriptions consistent across schema files.
///
/// Scans every schema file under `<DIR>/models/`, groups columns by name,
/// and reports columns whose descriptions disagree. With `--fix`, the most
/// common non-empty description is written into every other occurrence.
#[derive(Parser, Debug)]
#[command(name = "colsync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Project directory to scan (default: dbt).
    #[arg(default_value = DEFAULT_PROJECT_DIR)]
    pub dir: PathBuf,

    /// Auto-fix inconsistencies by using the most frequent description.
    #[arg(long)]
    pub fix: bool,

    /// Exit with a non-zero code when inconsistencies remain after the run.
    #[arg(long)]
    pub strict: bool,

    /// Report format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Settings file (default: <DIR>/.colsync.yaml when present).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// How the run report is rendered on stdout.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable report.
    Text,
    /// A single JSON document.
    Json,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
