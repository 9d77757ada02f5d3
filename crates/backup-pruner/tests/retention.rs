//! Tests for retention selection
//!

use backup_pruner::{
    BackupFile,
    retention::{SelectionError, disposable, label, newest},
};
use common::{backup_at, filenames};

mod common;

#[test]
fn keep_one() {
    let old_a = backup_at("0446", 1);
    let new = backup_at("0448", 1);
    let old_b = backup_at("0447", 1);
    let backups = [old_a.clone(), new.clone(), old_b.clone()];

    assert_eq!(newest(&backups).unwrap(), Some(&new));
    assert_eq!(disposable(&backups, 1).unwrap(), vec![&old_a, &old_b]);
}

#[test]
fn empty_set() {
    assert_eq!(newest(&[]).unwrap(), None);
    assert!(disposable(&[], 0).unwrap().is_empty());
    assert!(disposable(&[], 3).unwrap().is_empty());
}

#[test]
fn disposable_length() {
    let backups: Vec<BackupFile> = (0..5)
        .map(|minute| backup_at(&format!("04{minute:02}"), 1))
        .collect();

    for keep_count in 0..8 {
        let selected = disposable(&backups, keep_count).unwrap();
        assert_eq!(selected.len(), backups.len().saturating_sub(keep_count));
    }

    assert_eq!(disposable(&backups, 0).unwrap().len(), backups.len());
}

#[test]
fn partition_is_complete() {
    let backups = [
        backup_at("0449", 4),
        backup_at("0446", 1),
        backup_at("0448", 2),
        backup_at("0447", 2),
    ];
    let keep_count = 2;

    let disposed = disposable(&backups, keep_count).unwrap();
    let kept = disposable(&backups, 0)
        .unwrap()
        .into_iter()
        .rev()
        .take(keep_count)
        .collect::<Vec<_>>();

    assert_eq!(
        filenames(disposed.iter().copied()),
        ["backup-2020-08-23-0446.tgz", "backup-2020-08-23-0447.tgz"]
    );
    assert_eq!(disposed.len() + kept.len(), backups.len());
    assert!(backups.iter().all(|backup| disposed.contains(&backup) ^ kept.contains(&backup)));
}

#[test]
fn newest_ignores_order() {
    let mut backups = vec![
        backup_at("0447", 1),
        backup_at("0449", 1),
        backup_at("0446", 1),
        backup_at("0448", 1),
    ];
    let expected = backup_at("0449", 1);

    for _ in 0..backups.len() {
        backups.rotate_left(1);
        assert_eq!(newest(&backups).unwrap(), Some(&expected));

        let mut reversed = backups.clone();
        reversed.reverse();
        assert_eq!(newest(&reversed).unwrap(), Some(&expected));
    }
}

#[test]
fn ties_broken_by_filename() {
    let first = BackupFile::new("backup-a-2020-08-23-0446.tgz", 1);
    let second = BackupFile::new("backup-b-2020-08-23-0446.tgz", 1);

    let backups = [second.clone(), first.clone()];
    assert_eq!(newest(&backups).unwrap(), Some(&second));
    assert_eq!(disposable(&backups, 1).unwrap(), vec![&first]);
}

#[test]
fn unknown_creation_is_an_error() {
    let backups = [backup_at("0446", 1), BackupFile::new("backup-latest.tgz", 1)];
    let expected = SelectionError::UnknownCreation("backup-latest.tgz".to_string());

    assert_eq!(newest(&backups), Err(expected.clone()));
    assert_eq!(disposable(&backups, 5), Err(expected.clone()));
    assert_eq!(label(&backups, 1), Err(expected));
}

#[test]
fn lone_undated_backup_is_newest() {
    let backups = [BackupFile::new("backup-latest.tgz", 1)];

    assert_eq!(newest(&backups).unwrap(), Some(&backups[0]));
    assert!(disposable(&backups, 1).unwrap().is_empty());
}

#[test]
fn labeled() {
    let backups = [backup_at("0446", 1), backup_at("0447", 1), backup_at("0448", 1)];
    let labeled = label(&backups, 2).unwrap();

    assert_eq!(labeled.newest, Some(&backups[2]));
    assert_eq!(labeled.disposable, vec![&backups[0]]);
}
