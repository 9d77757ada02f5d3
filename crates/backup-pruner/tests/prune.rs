//! Tests for the prune workflow
//!

use std::path::PathBuf;

use backup_pruner::{
    config::Config,
    prune::{PruneError, PruneOutcome, backup_files_found, prune, prune_server},
    retention::SelectionError,
};
use common::{REMOTE_DIRECTORY, entry, settings};
use shared::{
    Context, RemoteEntry, TransportError,
    test::{Call, MockConnector, MockTransport, Operation, init_test_logger},
};

mod common;

fn server_listing() -> Vec<RemoteEntry> {
    vec![
        entry("backup-2020-08-23-0446.tgz", 10),
        entry("backup-2020-08-23-0449.tgz", 40),
        entry("notes.txt", 5),
        entry("backup-2020-08-23-0447.tgz", 20),
        entry("backup-2020-08-23-0448.tgz", 30),
    ]
}

#[test]
fn filters_listing() {
    let _logger = init_test_logger();

    let entries = vec![
        entry("backup-2020-08-23-0446.tgz", 10),
        entry("backup.tgz", 10),
        entry("archive-2020-08-23-0446.tgz", 10),
        RemoteEntry::new("backup-2020-08-23-0447.tgz", None),
        entry("backup.tar.gz", 3),
    ];

    let found = backup_files_found(&Context::default(), &entries);
    let names: Vec<&str> = found.iter().map(|backup| backup.filename()).collect();

    assert_eq!(names, ["backup-2020-08-23-0446.tgz", "backup.tar.gz"]);
}

#[test]
fn retrieves_newest_and_deletes_old() {
    let _logger = init_test_logger();

    let mut transport = MockTransport::new().with_listing(REMOTE_DIRECTORY, server_listing());
    let observer = transport.clone();

    let outcome = prune(&mut transport, &mut Context::default(), &settings(2)).unwrap();

    assert_eq!(
        outcome,
        PruneOutcome {
            retrieved_local_path: Some(PathBuf::from("/var/backups/backup-2020-08-23-0449.tgz")),
            deleted_remote_paths: vec![
                "/admin/backup/backup-2020-08-23-0446.tgz".to_string(),
                "/admin/backup/backup-2020-08-23-0447.tgz".to_string(),
            ],
        }
    );

    assert_eq!(
        observer.calls(),
        vec![
            Call::List(REMOTE_DIRECTORY.to_string()),
            Call::Get {
                remote: "/admin/backup/backup-2020-08-23-0449.tgz".to_string(),
                local: PathBuf::from("/var/backups/backup-2020-08-23-0449.tgz"),
            },
            Call::Unlink("/admin/backup/backup-2020-08-23-0446.tgz".to_string()),
            Call::Unlink("/admin/backup/backup-2020-08-23-0447.tgz".to_string()),
        ]
    );
}

#[test]
fn keeps_everything_within_window() {
    let mut transport = MockTransport::new().with_listing(REMOTE_DIRECTORY, server_listing());

    let outcome = prune(&mut transport, &mut Context::default(), &settings(10)).unwrap();

    assert!(outcome.retrieved_local_path.is_some());
    assert!(outcome.deleted_remote_paths.is_empty());
}

#[test]
fn empty_directory() {
    let mut transport = MockTransport::new();
    let observer = transport.clone();

    let outcome = prune(&mut transport, &mut Context::default(), &settings(1)).unwrap();

    assert_eq!(outcome, PruneOutcome::default());
    assert_eq!(observer.calls(), vec![Call::List(REMOTE_DIRECTORY.to_string())]);
}

#[test]
fn corrupted_set_is_left_untouched() {
    let _logger = init_test_logger();

    let listing = vec![
        entry("backup-2020-08-23-0446.tgz", 10),
        entry("backup-2020-08-23-0447.tgz", 20),
        entry("backup-2020-08-23-0448.tgz", 5),
    ];
    let mut transport = MockTransport::new().with_listing(REMOTE_DIRECTORY, listing);
    let observer = transport.clone();

    let result = prune(&mut transport, &mut Context::default(), &settings(1));

    match result {
        Err(PruneError::CorruptedBackups(names)) => {
            assert_eq!(names, ["backup-2020-08-23-0448.tgz"])
        }
        other => panic!("Expected corrupted backups, got {other:?}"),
    }
    assert_eq!(observer.calls(), vec![Call::List(REMOTE_DIRECTORY.to_string())]);
}

#[test]
fn unverified_set_is_pruned() {
    let listing = vec![
        entry("backup-2020-08-23-0446.tgz", 10),
        entry("backup-2020-08-23-0447.tgz", 0),
    ];
    let mut transport = MockTransport::new().with_listing(REMOTE_DIRECTORY, listing);

    let mut settings = settings(1);
    settings.verify_before_prune = false;

    let outcome = prune(&mut transport, &mut Context::default(), &settings).unwrap();

    assert_eq!(
        outcome.retrieved_local_path,
        Some(PathBuf::from("/var/backups/backup-2020-08-23-0447.tgz"))
    );
    assert_eq!(
        outcome.deleted_remote_paths,
        ["/admin/backup/backup-2020-08-23-0446.tgz"]
    );
}

#[test]
fn undated_backup_without_verification() {
    let listing = vec![
        entry("backup-2020-08-23-0446.tgz", 10),
        entry("backup-latest.tgz", 20),
    ];
    let mut transport = MockTransport::new().with_listing(REMOTE_DIRECTORY, listing);

    let mut settings = settings(1);
    settings.verify_before_prune = false;

    let result = prune(&mut transport, &mut Context::default(), &settings);
    assert!(matches!(result, Err(PruneError::Selection(_))));
}

#[test]
fn undated_backup_stops_verified_pass() {
    let listing = vec![
        entry("backup-2020-08-23-0446.tgz", 10),
        entry("backup-latest.tgz", 20),
    ];
    let mut transport = MockTransport::new().with_listing(REMOTE_DIRECTORY, listing);
    let observer = transport.clone();

    let result = prune(&mut transport, &mut Context::default(), &settings(1));

    assert!(matches!(
        result,
        Err(PruneError::Selection(SelectionError::UnknownCreation(name))) if name == "backup-latest.tgz"
    ));
    assert_eq!(observer.calls(), vec![Call::List(REMOTE_DIRECTORY.to_string())]);
}

#[test]
fn lone_undated_backup_is_retrieved() {
    let listing = vec![entry("backup-latest.tgz", 20)];
    let mut transport = MockTransport::new().with_listing(REMOTE_DIRECTORY, listing);

    let outcome = prune(&mut transport, &mut Context::default(), &settings(1)).unwrap();

    assert_eq!(
        outcome.retrieved_local_path,
        Some(PathBuf::from("/var/backups/backup-latest.tgz"))
    );
    assert!(outcome.deleted_remote_paths.is_empty());
}

#[test]
fn transport_failure_stops_the_pass() {
    let mut transport = MockTransport::new()
        .with_listing(REMOTE_DIRECTORY, server_listing())
        .failing(Operation::Get);
    let observer = transport.clone();

    let result = prune(&mut transport, &mut Context::default(), &settings(1));

    assert!(matches!(result, Err(PruneError::Transport(TransportError::Remote(_)))));
    assert!(
        !observer
            .calls()
            .iter()
            .any(|call| matches!(call, Call::Unlink(_)))
    );
}

#[test]
fn session_is_closed() {
    let template = MockTransport::new().with_listing(REMOTE_DIRECTORY, server_listing());
    let connector = MockConnector::new(template.clone());

    let mut config = Config::default();
    config.backup_settings = settings(3);

    let outcome = prune_server(&connector, &config).unwrap();

    assert_eq!(outcome.deleted_remote_paths.len(), 1);
    assert_eq!(connector.connections(), [config.credentials.hostname.clone()]);
    assert_eq!(template.calls().last(), Some(&Call::Close));
}

#[test]
fn session_is_closed_on_failure() {
    let template = MockTransport::new()
        .with_listing(REMOTE_DIRECTORY, server_listing())
        .failing(Operation::Unlink);
    let connector = MockConnector::new(template.clone());

    let mut config = Config::default();
    config.backup_settings = settings(1);

    assert!(prune_server(&connector, &config).is_err());
    assert_eq!(template.calls().last(), Some(&Call::Close));
}

#[test]
fn refused_connection() {
    let connector = MockConnector::new(MockTransport::new()).refusing("localhost");

    let result = prune_server(&connector, &Config::default());

    assert!(matches!(
        result,
        Err(PruneError::Transport(TransportError::TcpConnect(..)))
    ));
}
