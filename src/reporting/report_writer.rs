//! Report writing functionality

use anyhow::Result;
use chrono::Utc;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::summary::{format_size, Summary};
use crate::core::checksum::ChecksumAlgorithm;
use crate::core::validator::{Status, ValidationResult};

/// Machine-readable form of a full run
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub root: &'a Path,
    pub algorithm: ChecksumAlgorithm,
    pub summary: Summary,
    pub results: &'a [ValidationResult],
}

impl<'a> JsonReport<'a> {
    pub fn new(root: &'a Path, algorithm: ChecksumAlgorithm, results: &'a [ValidationResult]) -> Self {
        Self {
            root,
            algorithm,
            summary: Summary::from_results(results),
            results,
        }
    }
}

/// Write a run as pretty-printed JSON
pub fn write_json<W: Write>(
    out: &mut W,
    root: &Path,
    algorithm: ChecksumAlgorithm,
    results: &[ValidationResult],
) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, &JsonReport::new(root, algorithm, results))?;
    writeln!(out)?;
    Ok(())
}

/// Write validation results to a plain-text report file
///
/// # Arguments
/// * `output_path` - Path to output file
/// * `root` - Backup path that was validated
/// * `algorithm` - Digest the checksums were computed with
/// * `results` - Validation results to write
pub fn write_report(
    output_path: &Path,
    root: &Path,
    algorithm: ChecksumAlgorithm,
    results: &[ValidationResult],
) -> Result<()> {
    let mut file = BufWriter::new(File::create(output_path)?);
    let summary = Summary::from_results(results);

    writeln!(file, "Backup Integrity Report")?;
    writeln!(file, "=======================")?;
    writeln!(file, "Generated: {}", Utc::now().to_rfc3339())?;
    writeln!(file, "Backup path: {}", root.display())?;
    writeln!(file, "Checksum algorithm: {}", algorithm)?;
    writeln!(file)?;

    writeln!(file, "Summary Statistics:")?;
    writeln!(file, "-------------------")?;
    writeln!(file, "  Total files examined: {}", summary.total())?;
    writeln!(file, "  Valid: {}", summary.ok)?;
    writeln!(file, "  Warnings: {}", summary.warnings)?;
    writeln!(file, "  Errors: {}", summary.errors)?;

    if summary.total() > 0 {
        let valid_pct = (summary.ok as f64 / summary.total() as f64) * 100.0;
        writeln!(file, "  Validation success rate: {:.2}%", valid_pct)?;
    }

    writeln!(file)?;

    if !summary.is_clean() {
        writeln!(file, "Problem Files:")?;
        writeln!(file, "--------------")?;
        for result in results.iter().filter(|r| r.status != Status::Ok) {
            writeln!(
                file,
                "  [{}] {}: {}",
                result.status,
                result.path.display(),
                result.error_message
            )?;
        }
        writeln!(file)?;
    }

    writeln!(file, "Checksums:")?;
    writeln!(file, "----------")?;
    for result in results.iter().filter(|r| !r.checksum.is_empty()) {
        writeln!(
            file,
            "  {}  {} ({})",
            result.checksum,
            result.path.display(),
            format_size(result.size_bytes)
        )?;
    }

    file.flush()?;
    Ok(())
}
