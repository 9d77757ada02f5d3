//! SSH/SFTP backed transport sessions.
//!

use std::{
    fs::{self, File},
    io::{self, Read},
    net::TcpStream,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use ssh2::{CheckResult, KnownHostFileKind, Session, Sftp};
use tracing::{debug, warn};

use crate::{RemoteEntry, Transport, TransportError};

/// The credentials used to open a session with a remote host.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct Credentials {
    /// The user to authenticate as.
    pub username: String,

    /// The hostname or IP address of the remote host.
    pub hostname: String,

    /// The SSH port of the remote host.
    pub port: u16,

    /// The path to the private key used for authentication.
    pub private_key_file: PathBuf,

    /// The passphrase for the private key, if it has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passphrase: Option<String>,
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            username: "backup".to_string(),
            hostname: "localhost".to_string(),
            port: 22,
            private_key_file: PathBuf::from("/path/to/private_key"),
            passphrase: None,
        }
    }
}

/// Opens transport sessions.
pub trait Connector {
    /// The session type produced.
    type Session: Transport;

    /// Opens an authenticated session.
    fn connect(&self, credentials: &Credentials) -> Result<Self::Session, TransportError>;
}

/// Asks the remote shell to end the session before it is closed.
pub const QUIT_COMMAND: &str = "quit";

/// Opens a session, hands it to `task` and closes it on every exit path.
///
/// The remote shell is sent [`QUIT_COMMAND`] before the session is closed. A
/// failure to quit or close is logged and does not replace the result of
/// `task`.
pub fn with_session<C, T, E, F>(connector: &C, credentials: &Credentials, task: F) -> Result<T, E>
where
    C: Connector,
    E: From<TransportError>,
    F: FnOnce(&mut C::Session) -> Result<T, E>,
{
    let mut session = connector.connect(credentials)?;
    debug!("[{}] Session opened", credentials.hostname);

    let result = task(&mut session);

    if let Err(error) = session.exec(QUIT_COMMAND) {
        debug!("[{}] Quit was not accepted: {error}", credentials.hostname);
    }

    match session.close() {
        Ok(()) => debug!("[{}] Session closed", credentials.hostname),
        Err(error) => warn!("[{}] Could not close session: {error}", credentials.hostname),
    }

    result
}

/// Opens [`SshSession`]s, verifying hosts against a known hosts file.
#[derive(Debug, Clone)]
pub struct SshConnector {
    /// The OpenSSH formatted known hosts file.
    pub known_hosts_file: PathBuf,
}

impl SshConnector {
    /// Creates a new connector.
    pub fn new(known_hosts_file: PathBuf) -> Self {
        Self { known_hosts_file }
    }

    fn verify_host(&self, session: &Session, credentials: &Credentials) -> Result<(), TransportError> {
        let mut known_hosts = session
            .known_hosts()
            .map_err(|e| TransportError::Ssh(e, "initialise known hosts"))?;

        known_hosts
            .read_file(&self.known_hosts_file, KnownHostFileKind::OpenSSH)
            .map_err(|e| TransportError::Ssh(e, "read known hosts file"))?;

        let (key, _) = session.host_key().ok_or_else(|| {
            TransportError::UntrustedHost(credentials.hostname.clone(), "no host key presented")
        })?;

        match known_hosts.check_port(&credentials.hostname, credentials.port, key) {
            CheckResult::Match => Ok(()),
            CheckResult::Mismatch => Err(TransportError::UntrustedHost(
                credentials.hostname.clone(),
                "host key does not match",
            )),
            CheckResult::NotFound => Err(TransportError::UntrustedHost(
                credentials.hostname.clone(),
                "host is not in the known hosts file",
            )),
            CheckResult::Failure => Err(TransportError::UntrustedHost(
                credentials.hostname.clone(),
                "host key check failed",
            )),
        }
    }
}

impl Connector for SshConnector {
    type Session = SshSession;

    fn connect(&self, credentials: &Credentials) -> Result<SshSession, TransportError> {
        let address = format!("{}:{}", credentials.hostname, credentials.port);
        let socket = TcpStream::connect((credentials.hostname.as_str(), credentials.port))
            .map_err(|e| TransportError::TcpConnect(e, address))?;

        let mut session = Session::new().map_err(|e| TransportError::Ssh(e, "create session"))?;
        session.set_tcp_stream(socket);
        session
            .handshake()
            .map_err(|e| TransportError::Ssh(e, "complete handshake"))?;

        self.verify_host(&session, credentials)?;

        session
            .userauth_pubkey_file(
                &credentials.username,
                None,
                &credentials.private_key_file,
                credentials.passphrase.as_deref(),
            )
            .map_err(|e| TransportError::Ssh(e, "authenticate"))?;

        if !session.authenticated() {
            return Err(TransportError::Authentication(credentials.username.clone()));
        }

        let sftp = session
            .sftp()
            .map_err(|e| TransportError::Ssh(e, "open SFTP channel"))?;

        Ok(SshSession { session, sftp })
    }
}

/// Copies `remote_file` to `local_path`, removing the partial file on failure.
fn copy_to_local<R: Read>(remote_file: &mut R, local_path: &Path) -> Result<(), TransportError> {
    let mut local_file =
        File::create(local_path).map_err(|e| TransportError::Io(e, "create local file"))?;

    if let Err(error) = io::copy(remote_file, &mut local_file) {
        drop(local_file);
        if let Err(remove_error) = fs::remove_file(local_path) {
            warn!("Could not remove partial file {local_path:?}: {remove_error}");
        }

        return Err(TransportError::Io(error, "copy remote file"));
    }

    Ok(())
}

/// An authenticated SSH session with an open SFTP channel.
pub struct SshSession {
    session: Session,
    sftp: Sftp,
}

impl Transport for SshSession {
    fn list(&mut self, directory: &str) -> Result<Vec<RemoteEntry>, TransportError> {
        let entries = self
            .sftp
            .readdir(Path::new(directory))
            .map_err(|e| TransportError::Ssh(e, "list directory"))?;

        Ok(entries
            .into_iter()
            .filter_map(|(path, stat)| {
                let name = path.file_name()?.to_string_lossy().into_owned();
                Some(RemoteEntry::new(name, stat.size))
            })
            .collect())
    }

    fn get(&mut self, remote_path: &str, local_path: &Path) -> Result<(), TransportError> {
        let mut remote_file = self
            .sftp
            .open(Path::new(remote_path))
            .map_err(|e| TransportError::Ssh(e, "open remote file"))?;

        copy_to_local(&mut remote_file, local_path)
    }

    fn unlink(&mut self, remote_path: &str) -> Result<(), TransportError> {
        self.sftp
            .unlink(Path::new(remote_path))
            .map_err(|e| TransportError::Ssh(e, "delete remote file"))
    }

    fn stat(&mut self, remote_path: &str) -> Result<u64, TransportError> {
        let stat = self
            .sftp
            .stat(Path::new(remote_path))
            .map_err(|e| TransportError::Ssh(e, "stat remote file"))?;

        stat.size
            .ok_or_else(|| TransportError::MissingSize(remote_path.to_string()))
    }

    fn exec(&mut self, command: &str) -> Result<(), TransportError> {
        let mut channel = self
            .session
            .channel_session()
            .map_err(|e| TransportError::Ssh(e, "open channel"))?;

        channel
            .exec(command)
            .map_err(|e| TransportError::Ssh(e, "execute command"))?;

        // Drain output so the remote side is not blocked on a full window.
        let mut output = String::new();
        channel
            .read_to_string(&mut output)
            .map_err(|e| TransportError::Io(e, "read command output"))?;

        channel
            .wait_close()
            .map_err(|e| TransportError::Ssh(e, "close channel"))?;

        let status = channel
            .exit_status()
            .map_err(|e| TransportError::Ssh(e, "read exit status"))?;

        if status != 0 {
            return Err(TransportError::Remote(format!(
                "'{command}' exited with {status}: {}",
                output.trim()
            )));
        }

        Ok(())
    }

    fn close(&mut self) -> Result<(), TransportError> {
        self.session
            .disconnect(None, "session finished", None)
            .map_err(|e| TransportError::Ssh(e, "disconnect"))
    }
}
