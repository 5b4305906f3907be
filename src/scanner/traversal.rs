//! Backup traversal: single file or recursive directory walk

use std::cell::Cell;
use std::fs::{self, FileType};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::core::checksum::ChecksumAlgorithm;
use crate::core::error::ValidationError;
use crate::core::validator::{validate_file_with, ValidationResult};

/// Walks a backup root and validates every file beneath it
#[derive(Debug, Default)]
pub struct BackupValidator {
    algorithm: ChecksumAlgorithm,
    cancel: Option<Arc<AtomicBool>>,
    cancelled: Cell<bool>,
}

impl BackupValidator {
    pub fn new(algorithm: ChecksumAlgorithm) -> Self {
        Self {
            algorithm,
            ..Self::default()
        }
    }

    /// Stop between files once `flag` is set. A read already in progress
    /// always runs to completion.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn algorithm(&self) -> ChecksumAlgorithm {
        self.algorithm
    }

    /// Whether the last run stopped early on the cancel flag
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }

    /// Validate `root`, returning one result per examined file
    pub fn validate(&self, root: &Path) -> Vec<ValidationResult> {
        self.validate_with(root, |_| {})
    }

    /// Validate `root`, calling `on_result` once for each result as it is produced
    ///
    /// # Arguments
    /// * `root` - A single backup file or a backup directory
    /// * `on_result` - Observer, e.g. for driving a progress indicator
    ///
    /// # Returns
    /// Results in traversal order
    pub fn validate_with<F>(&self, root: &Path, mut on_result: F) -> Vec<ValidationResult>
    where
        F: FnMut(&ValidationResult),
    {
        self.cancelled.set(false);
        let mut results = Vec::new();

        if self.cancel_requested() {
            return results;
        }

        let metadata = match fs::metadata(root) {
            Ok(metadata) => metadata,
            Err(e) => {
                let result = ValidationResult::from_error(&ValidationError::access(root, e));
                warn!(path = %root.display(), error = %result.error_message, "cannot access backup root");
                on_result(&result);
                results.push(result);
                return results;
            }
        };

        if !metadata.is_dir() {
            let result = self.validate_target(root, metadata.file_type());
            on_result(&result);
            results.push(result);
            return results;
        }

        info!(root = %root.display(), algorithm = %self.algorithm, "walking backup directory");

        for entry in WalkDir::new(root).follow_links(false) {
            let result = match entry {
                Ok(entry) if entry.file_type().is_dir() => continue,
                Ok(entry) => {
                    if self.cancel_requested() {
                        break;
                    }
                    match self.validate_entry(entry.path(), entry.file_type()) {
                        Some(result) => result,
                        None => continue,
                    }
                }
                Err(err) => {
                    let err = ValidationError::walk(root, &err);
                    warn!(path = %err.path().display(), error = %err, "cannot access entry");
                    ValidationResult::from_error(&err)
                }
            };
            on_result(&result);
            results.push(result);
        }

        info!(
            root = %root.display(),
            files = results.len(),
            cancelled = self.is_cancelled(),
            "backup walk finished"
        );

        results
    }

    /// Symlinks are resolved once: links to directories are neither followed
    /// nor reported, dangling links are access errors.
    fn validate_entry(&self, path: &Path, file_type: FileType) -> Option<ValidationResult> {
        if !file_type.is_symlink() {
            return Some(self.validate_target(path, file_type));
        }

        match fs::metadata(path) {
            Ok(target) if target.is_dir() => None,
            Ok(target) => Some(self.validate_target(path, target.file_type())),
            Err(e) => {
                let err = ValidationError::access(path, e);
                warn!(path = %path.display(), error = %err, "cannot resolve symlink");
                Some(ValidationResult::from_error(&err))
            }
        }
    }

    /// Only regular files are opened; FIFOs, sockets and devices could block
    /// or never end.
    fn validate_target(&self, path: &Path, file_type: FileType) -> ValidationResult {
        if file_type.is_file() {
            return validate_file_with(path, self.algorithm);
        }

        let err = ValidationError::not_regular_file(path);
        warn!(path = %path.display(), error = %err, "skipping special file");
        ValidationResult::from_error(&err)
    }

    fn cancel_requested(&self) -> bool {
        let requested = self
            .cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::SeqCst));
        if requested {
            self.cancelled.set(true);
        }
        requested
    }
}

/// Validate a backup file or directory with the default (MD5) checksum
pub fn validate_backup(root: &Path) -> Vec<ValidationResult> {
    BackupValidator::default().validate(root)
}
