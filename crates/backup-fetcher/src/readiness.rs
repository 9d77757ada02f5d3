//! Checks that a generated file can be retrieved.
//!

use core::time::Duration;

use shared::{Clock, Context, RemotePath, SystemClock, Transport, TransportError};
use tracing::{debug, warn};

use crate::{config::AssertionOptions, poller::Poller};

/// Whether `path` is in the listing of its parent directory.
pub fn remote_file_exists<T: Transport>(
    transport: &mut T,
    path: &RemotePath,
) -> Result<bool, TransportError> {
    let file_name = path.file_name();
    let entries = transport.list(&path.parent_without_root())?;

    Ok(entries.iter().any(|entry| entry.name == file_name))
}

/// Whether `path` is at least `minimum_size` bytes.
pub fn remote_file_size_at_least<T: Transport>(
    transport: &mut T,
    path: &RemotePath,
    minimum_size: u64,
) -> Result<bool, TransportError> {
    Ok(transport.stat(&path.without_root())? >= minimum_size)
}

/// Waits for a generated file to exist and reach its minimum size.
#[derive(Debug, Clone)]
pub struct ReadinessCheck<C: Clock = SystemClock> {
    poller: Poller<C>,
    minimum_size_in_bytes: u64,
}

impl<C: Clock> ReadinessCheck<C> {
    /// Creates a check on the given clock.
    pub fn with_clock(options: &AssertionOptions, clock: C) -> Self {
        let poller = Poller::with_clock(
            Duration::from_secs(options.seconds_to_timeout),
            Duration::from_millis(options.poll_interval_milliseconds),
            clock,
        );

        Self {
            poller,
            minimum_size_in_bytes: options.minimum_size_in_bytes,
        }
    }

    /// Whether `path` exists and is large enough.
    ///
    /// The size is only checked once the file exists, and each check gets the
    /// full timeout.
    pub fn is_ready_to_retrieve<T: Transport>(
        &self,
        transport: &mut T,
        context: &Context,
        path: &RemotePath,
    ) -> Result<bool, TransportError> {
        let exists = self
            .poller
            .poll_until(|| remote_file_exists(transport, path))?;
        if !exists {
            warn!(
                "{context}{path} did not appear within {:?}",
                self.poller.timeout()
            );
            return Ok(false);
        }

        let large_enough = self.poller.poll_until(|| {
            remote_file_size_at_least(transport, path, self.minimum_size_in_bytes)
        })?;
        if !large_enough {
            warn!(
                "{context}{path} did not reach {} bytes within {:?}",
                self.minimum_size_in_bytes,
                self.poller.timeout()
            );
            return Ok(false);
        }

        debug!("{context}{path} is ready");
        Ok(true)
    }
}
