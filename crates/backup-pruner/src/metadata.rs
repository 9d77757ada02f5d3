//! Metadata encoded in backup file names.
//!

use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;

/// `<year>-<month>-<day>-<hour><minute>`
static CREATION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]{4}-[0-9]{2}-[0-9]{2}-[0-9]{4}").expect("valid pattern"));

/// `backup`, at least one character, then a `.`
static BACKUP_NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^backup.+\.").expect("valid pattern"));

const CREATION_FORMAT: &str = "%Y-%m-%d-%H%M";

/// The creation time written in a file name.
///
/// Only the first `YYYY-MM-DD-HHMM` occurrence is considered. Returns `None`
/// if there is none or it is not a real date and time.
pub fn creation_of(filename: &str) -> Option<NaiveDateTime> {
    let found = CREATION_PATTERN.find(filename)?;
    NaiveDateTime::parse_from_str(found.as_str(), CREATION_FORMAT).ok()
}

/// The text after the final `.` of a file name.
pub fn extension_of(filename: &str) -> Option<&str> {
    filename.rsplit_once('.').map(|(_, extension)| extension)
}

/// If a file name follows the backup naming convention.
pub fn is_backup_filename(filename: &str) -> bool {
    BACKUP_NAME_PATTERN.is_match(filename)
}
