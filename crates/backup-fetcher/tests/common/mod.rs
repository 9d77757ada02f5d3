//! # common
//!

#![allow(dead_code)]

use std::path::PathBuf;

use backup_fetcher::config::{AssertionOptions, BackupOptions, Device};
use chrono::{NaiveDate, NaiveDateTime};
use shared::{Credentials, RemoteEntry, test::ManualClock};

pub const BACKUP_FILE: &str = "rtr_2024-01-02-03-04-05.backup";
pub const EXPORT_FILE: &str = "rtr_2024-01-02-03-04-05.rsc";

pub fn timestamp() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 2)
        .unwrap()
        .and_hms_opt(3, 4, 5)
        .unwrap()
}

pub fn clock() -> ManualClock {
    ManualClock::new(timestamp())
}

pub fn options(seconds_to_timeout: u64, minimum_size_in_bytes: u64) -> AssertionOptions {
    AssertionOptions {
        seconds_to_timeout,
        minimum_size_in_bytes,
        poll_interval_milliseconds: 250,
    }
}

pub fn device(name: &str, hostname: &str) -> Device {
    Device {
        name: name.to_string(),
        backup_password: "secret".to_string(),
        credentials: Credentials {
            hostname: hostname.to_string(),
            ..Credentials::default()
        },
        backup_options: BackupOptions {
            backups_directory: PathBuf::from("/var/backups"),
            assertion_options: options(10, 77),
        },
    }
}

pub fn entry(name: &str, size: u64) -> RemoteEntry {
    RemoteEntry::new(name, Some(size))
}
