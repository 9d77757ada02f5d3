//! Backup pruner config
//!

use std::{fs, path::PathBuf};

use serde::{Deserialize, Serialize};
use shared::{Credentials, LogSettings};
use thiserror::Error;

/// Where backups live and how many to keep.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BackupSettings {
    /// The remote directory holding the backups.
    pub remote_backups_directory: String,

    /// The local directory the newest backup is retrieved to.
    pub local_backups_directory: PathBuf,

    /// The number of most recent backups to leave on the server.
    pub keeping_backups_quantity: usize,

    /// Refuse to retrieve or delete anything when the set contains a
    /// corrupted backup.
    #[serde(default = "default_verify_before_prune")]
    pub verify_before_prune: bool,
}

fn default_verify_before_prune() -> bool {
    true
}

impl Default for BackupSettings {
    fn default() -> Self {
        Self {
            remote_backups_directory: "/admin/backup/".to_string(),
            local_backups_directory: PathBuf::from("./backups"),
            keeping_backups_quantity: 7,
            verify_before_prune: true,
        }
    }
}

/// The pruner's config
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// The OpenSSH known hosts file used to verify the server.
    pub known_hosts_file: PathBuf,

    /// The file the outcome of each run is written to.
    pub report_file: PathBuf,

    #[allow(missing_docs)]
    pub logging: LogSettings,

    /// The credentials for the backup server.
    pub credentials: Credentials,

    /// The backup settings.
    pub backup_settings: BackupSettings,
}

impl Config {
    /// Tries to load a config from a toml file.
    pub fn load_toml(file_path: PathBuf) -> Result<Self, LoadConfigError> {
        if !file_path.exists() {
            return Err(LoadConfigError::NoFile);
        }

        let contents = fs::read_to_string(file_path).map_err(LoadConfigError::Read)?;
        let config = toml::from_str(&contents)?;

        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            known_hosts_file: PathBuf::from("/path/to/known_hosts"),
            report_file: PathBuf::from("./prune-report.json"),
            logging: LogSettings::default(),
            credentials: Credentials::default(),
            backup_settings: BackupSettings::default(),
        }
    }
}

#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum LoadConfigError {
    #[error("The file does not exist.")]
    NoFile,

    #[error("Failed to read the file:\n{0}")]
    Read(#[source] std::io::Error),

    #[error("Failed to deserialize the file:\n{0}")]
    Deserialize(#[from] toml::de::Error),
}
