//! Aggregate counts and human-readable sizes

use serde::Serialize;

use crate::core::validator::{Status, ValidationResult};

/// Per-status counts across a full run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub ok: usize,
    pub warnings: usize,
    pub errors: usize,
}

impl Summary {
    pub fn from_results(results: &[ValidationResult]) -> Self {
        results.iter().fold(Self::default(), |mut summary, result| {
            match result.status {
                Status::Ok => summary.ok += 1,
                Status::Warning => summary.warnings += 1,
                Status::Error => summary.errors += 1,
            }
            summary
        })
    }

    pub fn total(&self) -> usize {
        self.ok + self.warnings + self.errors
    }

    /// No warnings and no errors
    pub fn is_clean(&self) -> bool {
        self.warnings == 0 && self.errors == 0
    }

    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }
}

/// Format a byte count with binary prefixes
///
/// Below 1024 the exact count is shown (`"1023 B"`), otherwise one decimal
/// place with the largest fitting unit (`"1.0 KB"`, `"1.5 MB"`).
pub fn format_size(bytes: u64) -> String {
    const UNIT: u64 = 1024;
    const PREFIXES: [char; 6] = ['K', 'M', 'G', 'T', 'P', 'E'];

    if bytes < UNIT {
        return format!("{} B", bytes);
    }

    let mut div = UNIT;
    let mut exp = 0;
    let mut n = bytes / UNIT;
    while n >= UNIT {
        div *= UNIT;
        exp += 1;
        n /= UNIT;
    }

    format!("{:.1} {}B", bytes as f64 / div as f64, PREFIXES[exp])
}
