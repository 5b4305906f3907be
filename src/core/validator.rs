//! Per-file validation: open, size, checksum, classify

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::checksum::{compute_checksum, ChecksumAlgorithm};
use super::error::ValidationError;

/// Message attached to zero-length files
pub const EMPTY_FILE_MESSAGE: &str = "Empty file";

/// Outcome class of a single file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Ok,
    Warning,
    Error,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => write!(f, "OK"),
            Self::Warning => write!(f, "WARNING"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

/// Result of validating a single backup file
#[derive(Debug, Clone, Serialize)]
pub struct ValidationResult {
    pub path: PathBuf,
    pub size_bytes: u64,
    /// Lowercase hex digest, empty when it could not be computed
    pub checksum: String,
    pub status: Status,
    /// Empty unless status is `Warning` or `Error`
    pub error_message: String,
    pub examined_at: DateTime<Utc>,
}

impl ValidationResult {
    /// `ERROR` result for the path the error names, size 0 and no checksum
    pub fn from_error(err: &ValidationError) -> Self {
        Self {
            path: err.path().to_path_buf(),
            size_bytes: 0,
            checksum: String::new(),
            status: Status::Error,
            error_message: err.to_string(),
            examined_at: Utc::now(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == Status::Ok
    }
}

/// Validate a file using the default (MD5) checksum
pub fn validate_file(path: &Path) -> ValidationResult {
    validate_file_with(path, ChecksumAlgorithm::default())
}

/// Validate a file
///
/// # Arguments
/// * `path` - Path to the file
/// * `algorithm` - Digest to compute over its content
///
/// # Returns
/// Always a result; every failure is captured as `Status::Error`
pub fn validate_file_with(path: &Path, algorithm: ChecksumAlgorithm) -> ValidationResult {
    let result = match inspect(path, algorithm) {
        Ok((size_bytes, checksum)) => {
            let (status, error_message) = if size_bytes == 0 {
                (Status::Warning, EMPTY_FILE_MESSAGE.to_string())
            } else {
                (Status::Ok, String::new())
            };
            ValidationResult {
                path: path.to_path_buf(),
                size_bytes,
                checksum,
                status,
                error_message,
                examined_at: Utc::now(),
            }
        }
        Err(err) => ValidationResult::from_error(&err),
    };

    match result.status {
        Status::Error => warn!(path = %path.display(), error = %result.error_message, "validation failed"),
        _ => debug!(
            path = %path.display(),
            status = %result.status,
            size = result.size_bytes,
            checksum = %result.checksum,
            "validated"
        ),
    }

    result
}

/// Open, size and checksum `path`. The handle is dropped on every return.
fn inspect(path: &Path, algorithm: ChecksumAlgorithm) -> Result<(u64, String), ValidationError> {
    let mut file = File::open(path).map_err(|e| ValidationError::access(path, e))?;

    let size_bytes = file
        .metadata()
        .map_err(|e| ValidationError::access(path, e))?
        .len();

    let checksum =
        compute_checksum(&mut file, algorithm).map_err(|e| ValidationError::read(path, e))?;

    Ok((size_bytes, checksum))
}
