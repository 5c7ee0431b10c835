//! Console fallback backend.

use std::io::{self, Write};

use crate::backend::Backend;
use crate::error::LogError;
use crate::severity::Severity;

/// Writes every message as one line to a standard stream.
///
/// This is the fallback when syslog cannot be opened, so it has no
/// configuration and cannot fail to construct.
pub struct ConsoleBackend {
    out: Box<dyn Write + Send>,
    closed: bool,
}

impl ConsoleBackend {
    /// Console backend on stdout.
    pub fn stdout() -> Self {
        Self::with_writer(io::stdout())
    }

    /// Console backend on stderr.
    pub fn stderr() -> Self {
        Self::with_writer(io::stderr())
    }

    /// Console backend on an arbitrary writer.
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            out: Box::new(writer),
            closed: false,
        }
    }
}

impl Default for ConsoleBackend {
    fn default() -> Self {
        Self::stdout()
    }
}

impl Backend for ConsoleBackend {
    fn write(&mut self, _severity: Severity, message: &str) -> Result<(), LogError> {
        if self.closed {
            return Err(LogError::Closed);
        }
        writeln!(self.out, "{}", message)?;
        self.out.flush()?;
        Ok(())
    }

    fn close(&mut self) -> Result<(), LogError> {
        if self.closed {
            return Err(LogError::Closed);
        }
        self.closed = true;
        self.out.flush()?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "console"
    }
}

impl std::fmt::Debug for ConsoleBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleBackend")
            .field("closed", &self.closed)
            .finish()
    }
}
