//! Backup traversal

pub mod traversal;

pub use traversal::{validate_backup, BackupValidator};
