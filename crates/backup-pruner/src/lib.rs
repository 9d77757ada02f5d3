//! # backup-pruner
//! Retrieves the newest backup archive from a backup server and deletes the
//! ones outside the retention window.
//!

mod backup_file;
pub mod config;
pub mod corruption;
pub mod metadata;
pub mod prune;
pub mod retention;

pub use backup_file::{BackupFile, InvalidSizeError};
