//! Context for the current remote operation
//!

use core::fmt::{self, Display};

/// Holds the context of the current remote operation. Used for prefixing logs.
#[derive(Default, Debug, Clone)]
pub struct Context {
    /// The remote host or device being worked on.
    pub host: Option<String>,

    /// The remote file being worked on.
    pub file: Option<String>,

    /// The current stage.
    pub current_context: &'static str,
}

impl Context {
    /// Creates a context for a host.
    pub fn for_host(host: impl Into<String>) -> Self {
        Self {
            host: Some(host.into()),
            ..Self::default()
        }
    }
}

impl Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(host) = &self.host {
            write!(f, "[{host}] ")?;
        }

        if let Some(file) = &self.file {
            write!(f, "[{file}] ")?;
        }

        if !self.current_context.is_empty() {
            write!(f, "[{}] ", self.current_context)?;
        }

        Ok(())
    }
}
