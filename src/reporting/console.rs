//! Colored terminal rendering

use colored::{ColoredString, Colorize};
use std::io::{self, Write};

use super::summary::{format_size, Summary};
use crate::core::validator::{Status, ValidationResult};

fn status_tag(status: Status) -> ColoredString {
    let tag = status.to_string();
    match status {
        Status::Ok => tag.green(),
        Status::Warning => tag.yellow(),
        Status::Error => tag.red(),
    }
}

/// Render every result followed by the summary block
pub fn render_results<W: Write>(out: &mut W, results: &[ValidationResult]) -> io::Result<()> {
    writeln!(out, "{}", "\n=== BACKUP INTEGRITY TEST RESULTS ===\n".cyan())?;

    for result in results {
        writeln!(out, "[{}] {}", status_tag(result.status), result.path.display())?;
        writeln!(
            out,
            "    Size: {} | Checksum: {}",
            format_size(result.size_bytes),
            result.checksum.bright_white()
        )?;
        if !result.error_message.is_empty() {
            writeln!(out, "    {}: {}", "Error".red(), result.error_message)?;
        }
        writeln!(out)?;
    }

    render_summary(out, &Summary::from_results(results))
}

pub fn render_summary<W: Write>(out: &mut W, summary: &Summary) -> io::Result<()> {
    writeln!(out, "{}", "\n=== SUMMARY ===".cyan())?;
    writeln!(out, "  Valid: {}", summary.ok)?;
    writeln!(out, "  Warnings: {}", summary.warnings)?;
    writeln!(out, "  Errors: {}", summary.errors)?;

    if summary.is_clean() {
        writeln!(out, "{}", "\n✓ Backup integrity verified successfully!".green())?;
    }

    Ok(())
}

/// Print results to stdout
pub fn print_results(results: &[ValidationResult]) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    render_results(&mut out, results)?;
    out.flush()
}
