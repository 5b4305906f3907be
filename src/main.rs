use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::path::PathBuf;
use std::process::exit;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use backuptest::prelude::*;

const EXAMPLES: &str = "\
Examples:
  backuptest /backup/daily
  backuptest /backup/daily/database.sql
  backuptest --algorithm sha256 --format json /backup/daily";

/// Exit code when the path argument is missing
const EXIT_USAGE: i32 = 1;
/// Exit code for `--strict` runs that produced at least one ERROR
const EXIT_VALIDATION_FAILED: i32 = 2;
/// Exit code after Ctrl-C
const EXIT_INTERRUPTED: i32 = 130;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser)]
#[command(name = "backuptest", version)]
#[command(about = "backuptest - Backup Integrity Validator", long_about = None)]
#[command(after_help = EXAMPLES)]
struct Cli {
    /// Backup file or directory to validate
    backup_path: Option<PathBuf>,

    /// Checksum algorithm (md5 or sha256)
    #[arg(short, long, default_value_t = ChecksumAlgorithm::Md5)]
    algorithm: ChecksumAlgorithm,

    /// Output format for the results
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Also write a plain-text report to this file
    #[arg(short = 'o', long)]
    report: Option<PathBuf>,

    /// Exit non-zero when any file fails validation
    #[arg(long)]
    strict: bool,

    /// Run in batch mode (no progress spinner)
    #[arg(long)]
    batch: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Verbose output (debug logging to stderr)
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();
}

fn spinner(hidden: bool) -> Result<ProgressBar> {
    if hidden {
        return Ok(ProgressBar::hidden());
    }
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {pos} file(s) checked {msg}")
            .context("Invalid progress template")?,
    );
    pb.enable_steady_tick(Duration::from_millis(120));
    Ok(pb)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let Some(backup_path) = cli.backup_path else {
        Cli::command().print_help()?;
        exit(EXIT_USAGE);
    };

    init_logging(cli.verbose);

    if cli.no_color {
        colored::control::set_override(false);
    }

    // Set up graceful shutdown handler
    let shutdown_requested = Arc::new(AtomicBool::new(false));
    let shutdown_flag = shutdown_requested.clone();
    ctrlc::set_handler(move || {
        eprintln!("\n⚠️  Shutdown requested. Finishing current file...");
        shutdown_flag.store(true, Ordering::SeqCst);
    })
    .context("Error setting Ctrl-C handler")?;

    let validator = BackupValidator::new(cli.algorithm).with_cancel_flag(shutdown_requested);

    let progress = spinner(cli.batch)?;
    let results = validator.validate_with(&backup_path, |result| {
        progress.set_message(result.path.display().to_string());
        progress.inc(1);
    });
    progress.finish_and_clear();

    match cli.format {
        OutputFormat::Text => print_results(&results).context("Failed to print results")?,
        OutputFormat::Json => {
            let stdout = io::stdout();
            write_json(&mut stdout.lock(), &backup_path, validator.algorithm(), &results)
                .context("Failed to write JSON results")?;
        }
    }

    if let Some(ref report_path) = cli.report {
        write_report(report_path, &backup_path, validator.algorithm(), &results)
            .with_context(|| format!("Failed to write report to {}", report_path.display()))?;
        eprintln!("Detailed report saved to: {}", report_path.display());
    }

    if validator.is_cancelled() {
        eprintln!("⏹️  Validation interrupted after {} file(s)", results.len());
        exit(EXIT_INTERRUPTED);
    }

    if cli.strict && Summary::from_results(&results).has_errors() {
        exit(EXIT_VALIDATION_FAILED);
    }

    Ok(())
}
