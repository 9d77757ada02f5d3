//! Retrieve the newest backup from a server and prune the old ones.
//!

use std::path::PathBuf;

use serde::Serialize;
use shared::{
    Connector, Context, RemoteEntry, RemotePath, Transport, TransportError, with_session,
};
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    BackupFile,
    config::{BackupSettings, Config},
    corruption::corrupted,
    metadata::is_backup_filename,
    retention::{SelectionError, label},
};

/// What a prune pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PruneOutcome {
    /// Where the newest backup was saved, `None` if there were no backups.
    pub retrieved_local_path: Option<PathBuf>,

    /// The remote paths that were deleted.
    pub deleted_remote_paths: Vec<String>,
}

/// The backups in a directory listing.
///
/// Entries that do not follow the naming convention are ignored. Entries with
/// an invalid size are logged and skipped.
pub fn backup_files_found(context: &Context, entries: &[RemoteEntry]) -> Vec<BackupFile> {
    entries
        .iter()
        .filter(|entry| is_backup_filename(&entry.name))
        .filter_map(|entry| match BackupFile::try_from(entry) {
            Ok(backup) => Some(backup),
            Err(error) => {
                warn!("{context}Skipping entry: {error}");
                None
            }
        })
        .collect()
}

/// Retrieves the newest backup in the remote directory and deletes the ones
/// outside the retention window.
pub fn prune<T: Transport>(
    transport: &mut T,
    context: &mut Context,
    settings: &BackupSettings,
) -> Result<PruneOutcome, PruneError> {
    let directory = settings.remote_backups_directory.as_str();

    let backups = {
        context.current_context = "List";

        let entries = transport.list(directory)?;
        let backups = backup_files_found(context, &entries);
        info!(
            "{context}Found {} backups in {} entries of {directory}",
            backups.len(),
            entries.len()
        );

        backups
    };

    if settings.verify_before_prune {
        context.current_context = "Verify";

        let corrupted: Vec<String> = corrupted(&backups)
            .into_iter()
            .map(|backup| backup.filename().to_string())
            .collect();

        if !corrupted.is_empty() {
            warn!("{context}Corrupted backups: {}", corrupted.join(", "));
            return Err(PruneError::CorruptedBackups(corrupted));
        }
    }

    let labeled = label(&backups, settings.keeping_backups_quantity)?;

    let retrieved_local_path = match labeled.newest {
        Some(newest) => {
            context.current_context = "Retrieve";

            let remote_path = RemotePath::join(directory, newest.filename());
            let local_path = settings.local_backups_directory.join(newest.filename());

            transport.get(remote_path.as_str(), &local_path)?;
            info!("{context}Retrieved {remote_path} to {local_path:?}");

            Some(local_path)
        }
        None => {
            info!("{context}No backups to retrieve");
            None
        }
    };

    let mut deleted_remote_paths = Vec::with_capacity(labeled.disposable.len());
    {
        context.current_context = "Delete";

        for backup in labeled.disposable {
            let remote_path = RemotePath::join(directory, backup.filename());
            transport.unlink(remote_path.as_str())?;
            info!("{context}Deleted {remote_path}");

            deleted_remote_paths.push(remote_path.to_string());
        }
    }

    Ok(PruneOutcome {
        retrieved_local_path,
        deleted_remote_paths,
    })
}

/// Opens a session with the configured server and prunes it.
pub fn prune_server<C: Connector>(
    connector: &C,
    config: &Config,
) -> Result<PruneOutcome, PruneError> {
    let mut context = Context::for_host(config.credentials.hostname.clone());
    context.current_context = "Connect";

    with_session(connector, &config.credentials, |session| {
        prune(session, &mut context, &config.backup_settings)
    })
}

#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum PruneError {
    #[error("Transport failed: {0}")]
    Transport(#[from] TransportError),

    #[error("Could not select backups: {0}")]
    Selection(#[from] SelectionError),

    #[error("Backup set contains corrupted backups: {}", .0.join(", "))]
    CorruptedBackups(Vec<String>),
}
