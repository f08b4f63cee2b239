//! driftmon entry point.
//!
//! Parses current capture logs into snapshots, diffs them against recorded
//! baselines, and reports drift. Also exposes baseline index rebuild and
//! consistency checking as separate modes.

mod run;

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;

/// Run mode of the analysis entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Validate that the baseline index and files are coherent.
    Consistency,
    /// Rebuild the baseline index from stored snapshot files.
    Index,
    /// Parse current logs and diff them against baselines (default).
    Compare,
}

/// Network device state drift monitor
#[derive(Parser, Debug)]
#[command(name = "driftmon")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Run mode
    #[arg(short = 'm', long, value_enum, default_value = "compare")]
    mode: Mode,

    /// Baseline store directory
    #[arg(short = 'b', long, default_value = "baseline")]
    baseline_dir: PathBuf,

    /// Capture log directory (one dated subdirectory per run)
    #[arg(short = 'l', long, default_value = "logs")]
    log_dir: PathBuf,

    /// Only print aggregate counts and the final verdict
    #[arg(short = 'q', long)]
    quiet: bool,

    /// Per-error detail and debug diagnostics
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Save the rendered report under the baseline directory
    #[arg(long)]
    save_report: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let filter = if args.verbose {
        "debug"
    } else if args.quiet {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .init();

    let opts = run::Options {
        baseline_dir: args.baseline_dir,
        log_dir: args.log_dir,
        quiet: args.quiet,
        verbose: args.verbose,
        save_report: args.save_report,
    };

    let outcome = match args.mode {
        Mode::Consistency => run::consistency(&opts),
        Mode::Index => run::rebuild_index(&opts),
        Mode::Compare => run::compare(&opts).await,
    };

    match outcome {
        Ok(run::Verdict::Clean) => ExitCode::SUCCESS,
        Ok(run::Verdict::Findings) => ExitCode::from(1),
        Err(err) => {
            error!("run failed: {:#}", err);
            ExitCode::from(2)
        }
    }
}
