use std::{fs, io, path::Path};

use serde::Serialize;
use thiserror::Error;

/// Writes the outcome of a run as pretty printed JSON.
pub fn write_report<T: Serialize>(report_file: &Path, outcome: &T) -> Result<(), WriteReportError> {
    if let Some(directory) = report_file.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(directory).map_err(WriteReportError::CreateDirectory)?;
    }

    let contents = serde_json::to_string_pretty(outcome)?;
    fs::write(report_file, contents).map_err(WriteReportError::WriteFile)?;

    Ok(())
}

#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum WriteReportError {
    #[error("Failed to serialize report: {0}")]
    Serialize(#[from] serde_json::error::Error),

    #[error("Failed to create report directory: {0}")]
    CreateDirectory(#[source] io::Error),

    #[error("Failed to write report file: {0}")]
    WriteFile(#[source] io::Error),
}
