//! Per-file validation pipeline

pub mod checksum;
pub mod error;
pub mod validator;

pub use checksum::{checksum_bytes, compute_checksum, ChecksumAlgorithm};
pub use error::ValidationError;
pub use validator::{validate_file, validate_file_with, Status, ValidationResult, EMPTY_FILE_MESSAGE};
