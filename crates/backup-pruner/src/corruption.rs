//! Detects backups that break the expected size/age relationship.
//!
//! Backups of the same system should never shrink over time. A backup that is
//! newer than another but smaller than it is treated as truncated.
//!

use crate::BackupFile;

/// The extension every valid backup archive has.
pub const EXPECTED_EXTENSION: &str = "tgz";

/// If `candidate` is empty or has the wrong extension.
fn is_individually_invalid(candidate: &BackupFile) -> bool {
    candidate.size() == 0 || candidate.extension() != Some(EXPECTED_EXTENSION)
}

/// If `candidate` is corrupted in the context of `reference_set`.
///
/// A backup is corrupted when it is empty, does not have the
/// [`EXPECTED_EXTENSION`], or is newer than and smaller than some backup in
/// `reference_set`. A backup without a creation time is only ordered against
/// nothing, so only the first two rules apply to it.
pub fn is_corrupted<'a, I>(candidate: &BackupFile, reference_set: I) -> bool
where
    I: IntoIterator<Item = &'a BackupFile>,
{
    if is_individually_invalid(candidate) {
        return true;
    }

    reference_set.into_iter().any(|other| {
        candidate.is_newer_than(other).unwrap_or(false) && candidate.is_smaller_than(other)
    })
}

/// The backups in `backups` that are corrupted against the rest of the set.
///
/// Returned in ascending creation order, followed by any invalid backups
/// without a creation time in their original order.
pub fn corrupted(backups: &[BackupFile]) -> Vec<&BackupFile> {
    let mut dated: Vec<&BackupFile> = Vec::with_capacity(backups.len());
    let mut undated: Vec<&BackupFile> = Vec::new();
    for backup in backups {
        if backup.creation().is_some() {
            dated.push(backup);
        } else if is_individually_invalid(backup) {
            undated.push(backup);
        }
    }

    dated.sort_by_key(|backup| backup.creation());

    let mut corrupted = Vec::new();

    // Largest size among backups strictly older than the current group.
    let mut older_maximum: u64 = 0;

    for group in dated.chunk_by(|a, b| a.creation() == b.creation()) {
        for backup in group {
            if is_individually_invalid(backup) || backup.size() < older_maximum {
                corrupted.push(*backup);
            }
        }

        let group_maximum = group.iter().map(|backup| backup.size()).max().unwrap_or(0);
        older_maximum = older_maximum.max(group_maximum);
    }

    corrupted.extend(undated);
    corrupted
}

/// If no backup in `backups` is corrupted against the rest of the set.
pub fn all_valid(backups: &[BackupFile]) -> bool {
    corrupted(backups).is_empty()
}
