//! Time sources for polling and file naming.
//!

use core::time::Duration;
use std::{thread, time::Instant};

use chrono::{Local, NaiveDateTime};

/// A source of time that can also block the caller.
pub trait Clock {
    /// A monotonic instant.
    fn now(&self) -> Instant;

    /// The local wall-clock time, used to stamp generated file names.
    fn local_time(&self) -> NaiveDateTime;

    /// Blocks for `duration`.
    fn sleep(&self, duration: Duration);
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Instant {
        (**self).now()
    }

    fn local_time(&self) -> NaiveDateTime {
        (**self).local_time()
    }

    fn sleep(&self, duration: Duration) {
        (**self).sleep(duration)
    }
}

/// The system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn local_time(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }

    fn sleep(&self, duration: Duration) {
        thread::sleep(duration);
    }
}
