//! Generate backups on devices and fetch them.
//!

use std::path::PathBuf;

use chrono::NaiveDateTime;
use serde::Serialize;
use shared::{Clock, Connector, Context, RemotePath, Transport, TransportError, with_session};
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    command::{DeviceCommand, backup_command, export_command},
    config::{BackupOptions, Device},
    readiness::ReadinessCheck,
};

/// The files fetched from a device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceBackup {
    /// The device name.
    pub device: String,

    /// The local path of the binary backup then the export script, `None`
    /// where the file was not ready in time.
    pub files: Vec<Option<PathBuf>>,
}

/// Runs a device command and returns the name of the file it generates.
fn generate<T: Transport>(
    transport: &mut T,
    context: &mut Context,
    stage: &'static str,
    command: DeviceCommand,
) -> Result<String, TransportError> {
    context.current_context = stage;

    transport.exec(&command.command)?;
    info!("{context}Requested {}", command.filename);

    Ok(command.filename)
}

/// Generates the binary backup and the export script of a device.
pub fn generate_files<T: Transport>(
    transport: &mut T,
    context: &mut Context,
    device: &Device,
    timestamp: NaiveDateTime,
) -> Result<[String; 2], TransportError> {
    let backup = generate(
        transport,
        context,
        "Backup",
        backup_command(&device.name, &device.backup_password, timestamp),
    )?;
    let export = generate(
        transport,
        context,
        "Export",
        export_command(&device.name, timestamp),
    )?;

    Ok([backup, export])
}

/// Retrieves a generated file from the device root once it is ready, then
/// deletes it from the device.
///
/// Returns `None` if the file did not become ready in time.
pub fn retrieve_file<T: Transport, C: Clock>(
    transport: &mut T,
    context: &mut Context,
    filename: &str,
    options: &BackupOptions,
    readiness: &ReadinessCheck<C>,
) -> Result<Option<PathBuf>, TransportError> {
    context.file = Some(filename.to_string());
    context.current_context = "Wait";

    let remote_path = RemotePath::new(format!("/{filename}"));

    if !readiness.is_ready_to_retrieve(transport, context, &remote_path)? {
        warn!("{context}Not ready, skipping");
        context.file = None;
        return Ok(None);
    }

    context.current_context = "Retrieve";
    let local_path = options.backups_directory.join(filename);
    transport.get(&remote_path.without_root(), &local_path)?;
    info!("{context}Retrieved to {local_path:?}");

    context.current_context = "Delete";
    transport.unlink(&remote_path.without_root())?;
    info!("{context}Deleted from device");

    context.file = None;
    Ok(Some(local_path))
}

/// Generates and retrieves the files of a device over an open session.
pub fn backup_device<T: Transport, C: Clock>(
    transport: &mut T,
    context: &mut Context,
    device: &Device,
    clock: C,
) -> Result<DeviceBackup, TransportError> {
    let timestamp = clock.local_time();
    let filenames = generate_files(transport, context, device, timestamp)?;

    let options = &device.backup_options;
    let readiness = ReadinessCheck::with_clock(&options.assertion_options, clock);

    let mut files = Vec::with_capacity(filenames.len());
    for filename in &filenames {
        files.push(retrieve_file(
            transport, context, filename, options, &readiness,
        )?);
    }

    Ok(DeviceBackup {
        device: device.name.clone(),
        files,
    })
}

/// Backs up each device in turn, one session per device.
///
/// Stops at the first device that fails.
pub fn backup_devices<Conn: Connector, C: Clock>(
    connector: &Conn,
    devices: &[Device],
    clock: &C,
) -> Result<Vec<DeviceBackup>, FetchError> {
    let mut backups = Vec::with_capacity(devices.len());

    for device in devices {
        let mut context = Context::for_host(device.name.clone());
        context.current_context = "Connect";

        let backup = with_session(connector, &device.credentials, |session| {
            backup_device(session, &mut context, device, clock)
        })
        .map_err(|source| FetchError::Device {
            device: device.name.clone(),
            source,
        })?;

        let retrieved = backup.files.iter().flatten().count();
        info!(
            "[{}] Retrieved {retrieved} of {} files",
            device.name,
            backup.files.len()
        );

        backups.push(backup);
    }

    Ok(backups)
}

#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Backing up {device} failed: {source}")]
    Device {
        device: String,
        #[source]
        source: TransportError,
    },
}
