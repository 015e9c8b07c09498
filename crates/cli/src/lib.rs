//! CLI for MLPerf Storage results reporting.
//!
//! This crate provides the `mlps-report` command, whose `reportgen`
//! subcommand classifies every run under a results directory and writes
//! the reports.

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

use clap::{Parser, Subcommand};
use mlps_report::{generate_reports, ReportContext, ReportError};
use mlps_report_core::ExitCode;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// MLPerf Storage reporting CLI.
#[derive(Parser, Debug)]
#[command(name = "mlps-report")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging.
    #[arg(long, global = true, env = "MLPS_DEBUG")]
    pub debug: bool,

    /// Log every discovered run in full.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate reports for a results directory.
    ///
    /// Every run below the directory is verified on its own and together
    /// with the other runs of its workload. A categorized summary is
    /// printed, and these files are written to the directory root:
    /// - results.json - all run records
    /// - results.csv - one flattened row per run
    Reportgen {
        /// Directory holding the benchmark results.
        #[arg(short, long, env = "MLPS_RESULTS_DIR")]
        results_dir: PathBuf,
    },
}

/// Install the global tracing subscriber.
///
/// Logs go to stderr so that stdout only carries the report. `RUST_LOG`
/// takes precedence over the flags.
pub fn init_logging(debug: bool, verbose: bool) {
    let level = if verbose {
        "trace"
    } else if debug {
        "debug"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Run the command described by `cli`.
///
/// # Returns
///
/// The exit code to terminate with, or an error if the command failed.
pub fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    match cli.command {
        Commands::Reportgen { results_dir } => {
            let ctx = ReportContext::new(results_dir, cli.debug)?;
            let stdout = std::io::stdout();
            let code = generate_reports(ctx, &mut stdout.lock())?;
            Ok(code)
        }
    }
}

/// Exit code for an error returned by [`run`].
pub fn exit_code_for(err: &anyhow::Error) -> ExitCode {
    err.downcast_ref::<ReportError>()
        .map(ReportError::exit_code)
        .unwrap_or(ExitCode::GeneralError)
}
