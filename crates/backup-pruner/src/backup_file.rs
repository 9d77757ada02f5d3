use core::num::ParseIntError;

use chrono::NaiveDateTime;
use shared::RemoteEntry;
use thiserror::Error;

use crate::metadata::{creation_of, extension_of};

/// A backup archive, identified by its file name and size.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BackupFile {
    filename: String,
    size: u64,
    creation: Option<NaiveDateTime>,
}

impl BackupFile {
    /// Creates a new backup file.
    pub fn new(filename: impl Into<String>, size: u64) -> Self {
        let filename = filename.into();
        let creation = creation_of(&filename);

        Self {
            filename,
            size,
            creation,
        }
    }

    /// Creates a backup file from a textual size.
    pub fn parse(filename: impl Into<String>, size: &str) -> Result<Self, InvalidSizeError> {
        let filename = filename.into();
        let size = size
            .trim()
            .parse::<u64>()
            .map_err(|e| InvalidSizeError::NotNumeric(filename.clone(), size.to_string(), e))?;

        Ok(Self::new(filename, size))
    }

    /// The file name.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// The size in bytes.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// The creation time written in the file name.
    pub fn creation(&self) -> Option<NaiveDateTime> {
        self.creation
    }

    /// The file extension, without the leading `.`.
    pub fn extension(&self) -> Option<&str> {
        extension_of(&self.filename)
    }

    /// If this backup is smaller than `other`.
    pub fn is_smaller_than(&self, other: &Self) -> bool {
        self.size < other.size
    }

    /// If this backup was created after `other`.
    ///
    /// `None` when either creation time is unknown.
    pub fn is_newer_than(&self, other: &Self) -> Option<bool> {
        Some(self.creation? > other.creation?)
    }
}

impl TryFrom<&RemoteEntry> for BackupFile {
    type Error = InvalidSizeError;

    fn try_from(entry: &RemoteEntry) -> Result<Self, Self::Error> {
        match entry.size {
            Some(size) => Ok(Self::new(entry.name.clone(), size)),
            None => Err(InvalidSizeError::Missing(entry.name.clone())),
        }
    }
}

#[allow(missing_docs)]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidSizeError {
    #[error("{0} has no size")]
    Missing(String),

    #[error("{0} has a size '{1}' that is not a non-negative integer: {2}")]
    NotNumeric(String, String, #[source] ParseIntError),
}
