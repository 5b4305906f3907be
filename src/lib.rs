//! Backup Integrity Validator Library
//!
//! Confirms that every file in a backup is present, readable and non-empty,
//! and computes a content checksum for later comparison.

pub mod core;
pub mod scanner;
pub mod reporting;

pub use crate::core::validator;
pub use crate::scanner::traversal;
pub use crate::reporting::report_writer;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::core::checksum::{checksum_bytes, compute_checksum, ChecksumAlgorithm};
    pub use crate::core::error::ValidationError;
    pub use crate::core::validator::{
        validate_file, validate_file_with, Status, ValidationResult, EMPTY_FILE_MESSAGE,
    };
    pub use crate::scanner::traversal::{validate_backup, BackupValidator};
    pub use crate::reporting::summary::{format_size, Summary};
    pub use crate::reporting::console::{print_results, render_results};
    pub use crate::reporting::report_writer::{write_json, write_report};
}
