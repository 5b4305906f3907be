//! Error taxonomy for backup validation
//!
//! None of these ever escape a traversal. Each one is folded into an
//! `ERROR` result for the path it names, see
//! [`ValidationResult::from_error`](crate::core::validator::ValidationResult::from_error).

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    /// The path could not be stat-ed or opened (missing, permission, I/O)
    #[error("{source}")]
    Access {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Streaming the file content through the digest failed
    #[error("{source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A directory entry could not be reached during the walk
    #[error("{message}")]
    Walk { path: PathBuf, message: String },

    /// FIFO, socket or device node; never opened
    #[error("not a regular file")]
    NotRegularFile { path: PathBuf },
}

impl ValidationError {
    pub fn access(path: &Path, source: io::Error) -> Self {
        Self::Access {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn read(path: &Path, source: io::Error) -> Self {
        Self::Read {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn not_regular_file(path: &Path) -> Self {
        Self::NotRegularFile {
            path: path.to_path_buf(),
        }
    }

    /// Build from a `walkdir` error, preferring the underlying I/O error text
    /// and falling back to `root` when the error carries no path.
    pub fn walk(root: &Path, err: &walkdir::Error) -> Self {
        let path = err.path().unwrap_or(root).to_path_buf();
        let message = match err.io_error() {
            Some(io_err) => io_err.to_string(),
            None => err.to_string(),
        };
        Self::Walk { path, message }
    }

    /// Path the error is reported against
    pub fn path(&self) -> &Path {
        match self {
            Self::Access { path, .. }
            | Self::Read { path, .. }
            | Self::Walk { path, .. }
            | Self::NotRegularFile { path } => path,
        }
    }
}
