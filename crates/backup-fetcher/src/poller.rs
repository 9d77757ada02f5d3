//! Re-evaluates a predicate until it holds or a deadline passes.
//!

use core::time::Duration;

use shared::{Clock, SystemClock};
use tracing::trace;

/// The shortest pause between evaluations.
pub const MINIMUM_INTERVAL: Duration = Duration::from_millis(10);

/// Polls a predicate with a per-call deadline.
///
/// The predicate is evaluated, and while it is false and the deadline has not
/// passed the poller sleeps for the interval and evaluates it again. Once the
/// loop ends, for either reason, the predicate is evaluated one final time and
/// that result is returned. A predicate error ends polling immediately.
#[derive(Debug, Clone)]
pub struct Poller<C: Clock = SystemClock> {
    timeout: Duration,
    interval: Duration,
    clock: C,
}

impl<C: Clock> Poller<C> {
    /// Creates a poller on the given clock.
    ///
    /// Intervals shorter than [`MINIMUM_INTERVAL`] are raised to it.
    pub fn with_clock(timeout: Duration, interval: Duration, clock: C) -> Self {
        Self {
            timeout,
            interval: interval.max(MINIMUM_INTERVAL),
            clock,
        }
    }

    /// The deadline applied to each call of [`Self::poll_until`].
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Polls `predicate` until it holds or the timeout elapses.
    pub fn poll_until<E, F>(&self, mut predicate: F) -> Result<bool, E>
    where
        F: FnMut() -> Result<bool, E>,
    {
        let start = self.clock.now();
        let mut evaluations: u32 = 1;

        while !predicate()? {
            let elapsed = self.clock.now().saturating_duration_since(start);
            let remaining = self.timeout.saturating_sub(elapsed);
            if remaining.is_zero() {
                break;
            }

            self.clock.sleep(self.interval.min(remaining));
            evaluations += 1;
        }

        let satisfied = predicate()?;
        trace!(
            "Final check after {evaluations} evaluations in {:?}: {satisfied}",
            self.clock.now().saturating_duration_since(start)
        );

        Ok(satisfied)
    }
}
