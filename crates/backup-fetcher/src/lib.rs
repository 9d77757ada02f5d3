//! # backup-fetcher
//! Has devices generate a binary backup and an export script, waits for the
//! files to be written, then retrieves and removes them.
//!

pub mod command;
pub mod config;
pub mod fetch;
pub mod poller;
pub mod readiness;
