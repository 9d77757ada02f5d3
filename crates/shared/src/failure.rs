use std::process;

use tracing::error;

/// Exit code used when a binary cannot continue.
pub const FAILURE_EXIT_CODE: i32 = 1;

/// Logs an unrecoverable error and exits the process.
pub fn log_and_exit<Err: core::fmt::Display>(error: Err, message: &str) -> ! {
    error!("{message}: {error}");
    eprintln!("{message}: {error}");

    process::exit(FAILURE_EXIT_CODE);
}

/// Extension trait for results in binaries.
pub trait Failure<T> {
    /// Unwraps the value or logs the error and exits.
    fn or_log_and_exit(self, message: &str) -> T;
}

impl<T, E: core::fmt::Display> Failure<T> for Result<T, E> {
    fn or_log_and_exit(self, message: &str) -> T {
        match self {
            Ok(value) => value,
            Err(error) => log_and_exit(error, message),
        }
    }
}
