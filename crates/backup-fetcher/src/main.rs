//! # backup-fetcher
//! Fetches fresh backups from the configured devices.
//!

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

use std::{fs, path::PathBuf};

use backup_fetcher::{config::Config, fetch::backup_devices};
use mimalloc::MiMalloc;
use shared::{Failure, SshConnector, SystemClock, init_logger, write_report};
use tracing::{error, info};

fn main() {
    // Initialize config if args include 'init'.
    if std::env::args().any(|arg| arg.eq("init")) {
        let config = Config::default();
        let contents =
            toml::to_string_pretty(&config).or_log_and_exit("Could not serialize config file");
        fs::write("config.toml", contents).or_log_and_exit("Could not create config file");
        return;
    }

    let config =
        Config::load_toml(PathBuf::from("./config.toml")).or_log_and_exit("Could not load config");

    let _logger = init_logger(&config.logging, "backup-fetcher")
        .or_log_and_exit("Could not initialize logger");

    let connector = SshConnector::new(config.known_hosts_file.clone());

    let backups =
        backup_devices(&connector, &config.devices, &SystemClock).or_log_and_exit("Fetch failed");

    let missing: usize = backups
        .iter()
        .map(|backup| backup.files.iter().filter(|file| file.is_none()).count())
        .sum();
    info!(
        "Backed up {} devices, {missing} files were not ready",
        backups.len()
    );

    if let Err(error) = write_report(&config.report_file, &backups) {
        error!("Could not write report: {error}");
    }
}
