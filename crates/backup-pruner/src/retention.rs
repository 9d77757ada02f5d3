//! Selects which backups to keep.
//!

use core::cmp::Ordering;

use thiserror::Error;

use crate::BackupFile;

/// A set of backups split by the retention policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledBackups<'a> {
    /// The most recently created backup.
    pub newest: Option<&'a BackupFile>,

    /// The backups outside the retention window, oldest first.
    pub disposable: Vec<&'a BackupFile>,
}

/// Sorts `backups` oldest first, ties broken by file name.
///
/// A lone backup needs no ordering, so only sets of two or more require every
/// backup to have a creation time.
fn sorted_by_creation(backups: &[BackupFile]) -> Result<Vec<&BackupFile>, SelectionError> {
    if backups.len() > 1 {
        if let Some(undated) = backups.iter().find(|backup| backup.creation().is_none()) {
            return Err(SelectionError::UnknownCreation(undated.filename().to_string()));
        }
    }

    let mut sorted: Vec<&BackupFile> = backups.iter().collect();
    sorted.sort_by(|a, b| compare_creation(a, b));

    Ok(sorted)
}

fn compare_creation(a: &BackupFile, b: &BackupFile) -> Ordering {
    a.creation()
        .cmp(&b.creation())
        .then_with(|| a.filename().cmp(b.filename()))
}

/// The most recently created backup, `None` if there are none.
pub fn newest(backups: &[BackupFile]) -> Result<Option<&BackupFile>, SelectionError> {
    Ok(sorted_by_creation(backups)?.pop())
}

/// All but the `keep_count` most recently created backups, oldest first.
pub fn disposable(
    backups: &[BackupFile],
    keep_count: usize,
) -> Result<Vec<&BackupFile>, SelectionError> {
    let mut sorted = sorted_by_creation(backups)?;
    sorted.truncate(sorted.len().saturating_sub(keep_count));

    Ok(sorted)
}

/// Labels the newest and the disposable backups of a set.
pub fn label(backups: &[BackupFile], keep_count: usize) -> Result<LabeledBackups<'_>, SelectionError> {
    Ok(LabeledBackups {
        newest: newest(backups)?,
        disposable: disposable(backups, keep_count)?,
    })
}

#[allow(missing_docs)]
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("{0} has no creation time in its name and cannot be ordered")]
    UnknownCreation(String),
}
