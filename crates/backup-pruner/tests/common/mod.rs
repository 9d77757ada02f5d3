//! # common
//!

#![allow(dead_code)]

use std::path::PathBuf;

use backup_pruner::{BackupFile, config::BackupSettings};
use shared::RemoteEntry;

pub const REMOTE_DIRECTORY: &str = "/admin/backup/";

/// A `.tgz` backup created on 2020-08-23 at `hhmm`.
pub fn backup_at(hhmm: &str, size: u64) -> BackupFile {
    BackupFile::new(format!("backup-2020-08-23-{hhmm}.tgz"), size)
}

pub fn entry(name: &str, size: u64) -> RemoteEntry {
    RemoteEntry::new(name, Some(size))
}

pub fn settings(keeping_backups_quantity: usize) -> BackupSettings {
    BackupSettings {
        remote_backups_directory: REMOTE_DIRECTORY.to_string(),
        local_backups_directory: PathBuf::from("/var/backups"),
        keeping_backups_quantity,
        verify_before_prune: true,
    }
}

pub fn filenames<'a>(backups: impl IntoIterator<Item = &'a BackupFile>) -> Vec<&'a str> {
    backups.into_iter().map(BackupFile::filename).collect()
}
