//! Device commands that generate backup files.
//!

use chrono::NaiveDateTime;

/// The timestamp format used in generated file names.
pub const FILENAME_TIMESTAMP_FORMAT: &str = "%Y-%m-%d-%H-%M-%S";

/// A command to run on a device and the file it produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceCommand {
    /// The command line.
    pub command: String,

    /// The name of the file the command writes to the device root.
    pub filename: String,
}

/// `<device>_<timestamp>`
fn stem(device: &str, timestamp: NaiveDateTime) -> String {
    format!("{device}_{}", timestamp.format(FILENAME_TIMESTAMP_FORMAT))
}

/// The name of the binary backup generated at `timestamp`.
pub fn backup_filename(device: &str, timestamp: NaiveDateTime) -> String {
    format!("{}.backup", stem(device, timestamp))
}

/// The name of the export script generated at `timestamp`.
pub fn export_filename(device: &str, timestamp: NaiveDateTime) -> String {
    format!("{}.rsc", stem(device, timestamp))
}

/// Saves an encrypted binary backup.
pub fn backup_command(device: &str, password: &str, timestamp: NaiveDateTime) -> DeviceCommand {
    let filename = backup_filename(device, timestamp);

    DeviceCommand {
        command: format!("/system backup save name={filename} password={password}"),
        filename,
    }
}

/// Exports the configuration as a script.
pub fn export_command(device: &str, timestamp: NaiveDateTime) -> DeviceCommand {
    let filename = export_filename(device, timestamp);

    DeviceCommand {
        command: format!("/ export file={filename}"),
        filename,
    }
}
