//! # backup-pruner
//! Retrieves the newest backup from the configured server and prunes the rest.
//!

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

use std::{fs, path::PathBuf};

use backup_pruner::{config::Config, prune::prune_server};
use mimalloc::MiMalloc;
use shared::{Failure, SshConnector, init_logger, write_report};
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

    let _logger = init_logger(&config.logging, "backup-pruner")
        .or_log_and_exit("Could not initialize logger");

    let connector = SshConnector::new(config.known_hosts_file.clone());

    let outcome = prune_server(&connector, &config).or_log_and_exit("Prune failed");

    match &outcome.retrieved_local_path {
        Some(path) => info!("Retrieved newest backup to {path:?}"),
        None => info!("No backup was retrieved"),
    }
    info!("Deleted {} backups", outcome.deleted_remote_paths.len());

    if let Err(error) = write_report(&config.report_file, &outcome) {
        error!("Could not write report: {error}");
    }
}
