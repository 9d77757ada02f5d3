//! # Shared
//! The shared components between the backup pruner and fetcher.
//!

#![warn(missing_docs)]

mod clock;
mod context;
mod failure;
mod logger;
mod remote_path;
mod report;
mod session;
mod transport;

pub use clock::{Clock, SystemClock};
pub use context::Context;
pub use failure::{FAILURE_EXIT_CODE, Failure, log_and_exit};
pub use logger::{LogLevel, LogSettings, LoggerError, init_logger};
pub use remote_path::RemotePath;
pub use report::{WriteReportError, write_report};
pub use session::{
    Connector, Credentials, QUIT_COMMAND, SshConnector, SshSession, with_session,
};
pub use transport::{RemoteEntry, Transport, TransportError};
