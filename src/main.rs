//! Colsync: keeps dbt column descriptions consistent across schema files.
//!
//! This is the main entry point for the `colsync` CLI. It parses arguments,
//! runs the scan (and fix), and maps the result to an exit code.

mod cli;
mod commands;
pub mod collect;
pub mod config;
pub mod context;
pub mod error;
pub mod exit_codes;
pub mod fs;
mod logging;
pub mod patch;
pub mod reconcile;
mod report;
pub mod schema;

#[cfg(test)]
mod test_support;

use cli::Cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    logging::init(cli.verbose, cli.quiet);

    match commands::dispatch(&cli) {
        Ok(consistent) if cli.strict && !consistent => {
            ExitCode::from(exit_codes::INCONSISTENT as u8)
        }
        Ok(_) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            // Print user-actionable error message to stderr
            eprintln!("Error: {}", err);

            ExitCode::from(err.exit_code() as u8)
        }
    }
}
