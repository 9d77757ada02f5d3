//! Backup fetcher config
//!

use std::{fs, path::PathBuf};

use serde::{Deserialize, Serialize};
use shared::{Credentials, LogSettings};
use thiserror::Error;

/// How long and how hard to wait for a generated file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AssertionOptions {
    /// The deadline for each readiness check.
    pub seconds_to_timeout: u64,

    /// The size a file must reach before it is retrieved.
    pub minimum_size_in_bytes: u64,

    /// The pause between evaluations of a readiness check.
    #[serde(default = "default_poll_interval_milliseconds")]
    pub poll_interval_milliseconds: u64,
}

fn default_poll_interval_milliseconds() -> u64 {
    250
}

impl Default for AssertionOptions {
    fn default() -> Self {
        Self {
            seconds_to_timeout: 10,
            minimum_size_in_bytes: 77,
            poll_interval_milliseconds: default_poll_interval_milliseconds(),
        }
    }
}

/// Where to save a device's files and when they count as ready.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BackupOptions {
    /// The local directory retrieved files are saved to.
    pub backups_directory: PathBuf,

    #[allow(missing_docs)]
    pub assertion_options: AssertionOptions,
}

impl Default for BackupOptions {
    fn default() -> Self {
        Self {
            backups_directory: PathBuf::from("./backups"),
            assertion_options: AssertionOptions::default(),
        }
    }
}

/// A device to back up.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Device {
    /// The device name, used as the prefix of generated files.
    pub name: String,

    /// The password the binary backup is encrypted with.
    pub backup_password: String,

    /// The credentials for the device.
    pub credentials: Credentials,

    #[allow(missing_docs)]
    pub backup_options: BackupOptions,
}

impl Default for Device {
    fn default() -> Self {
        Self {
            name: "router".to_string(),
            backup_password: "change-me".to_string(),
            credentials: Credentials::default(),
            backup_options: BackupOptions::default(),
        }
    }
}

/// The fetcher's config
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// The OpenSSH known hosts file used to verify devices.
    pub known_hosts_file: PathBuf,

    /// The file the outcome of each run is written to.
    pub report_file: PathBuf,

    #[allow(missing_docs)]
    pub logging: LogSettings,

    /// The devices to back up, in order.
    pub devices: Vec<Device>,
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
            report_file: PathBuf::from("./fetch-report.json"),
            logging: LogSettings::default(),
            devices: vec![Device::default()],
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
