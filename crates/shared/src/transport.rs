//! The remote session operations the workflows are built on.
//!

use std::{io, path::Path};

use thiserror::Error;

/// A single entry from a remote directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteEntry {
    /// The entry's file name, without its directory.
    pub name: String,

    /// The entry's size in bytes, if the server reported one.
    pub size: Option<u64>,
}

impl RemoteEntry {
    /// Creates a new entry.
    pub fn new(name: impl Into<String>, size: Option<u64>) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }
}

/// A blocking remote shell and file-transfer session.
pub trait Transport {
    /// Lists the entries of a remote directory.
    fn list(&mut self, directory: &str) -> Result<Vec<RemoteEntry>, TransportError>;

    /// Copies a remote file to a local path.
    fn get(&mut self, remote_path: &str, local_path: &Path) -> Result<(), TransportError>;

    /// Deletes a remote file.
    fn unlink(&mut self, remote_path: &str) -> Result<(), TransportError>;

    /// Returns the size in bytes of a remote file.
    fn stat(&mut self, remote_path: &str) -> Result<u64, TransportError>;

    /// Runs a command on the remote host and waits for it to finish.
    fn exec(&mut self, command: &str) -> Result<(), TransportError>;

    /// Ends the session.
    fn close(&mut self) -> Result<(), TransportError>;
}

#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Failed to make TCP connection to {1}: {0}")]
    TcpConnect(#[source] io::Error, String),

    #[error("SSH failure while trying to {1}: {0}")]
    Ssh(#[source] ssh2::Error, &'static str),

    #[error("Host key for {0} is not trusted: {1}")]
    UntrustedHost(String, &'static str),

    #[error("Authentication as {0} was rejected")]
    Authentication(String),

    #[error("Failed to {1}: {0}")]
    Io(#[source] io::Error, &'static str),

    #[error("Remote {0} has no size")]
    MissingSize(String),

    #[error("Remote operation failed: {0}")]
    Remote(String),
}
