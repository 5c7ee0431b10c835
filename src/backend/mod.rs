//! Logging backends.
//!
//! A backend is the sink at the bottom of a [`Logger`](crate::logger::Logger).
//! It receives fully formatted strings and must deliver them verbatim; all
//! interpolation and prefixing happens in the facade.
//!
//! # Variants
//!
//! - `SyslogBackend`: the host's syslog daemon (primary)
//! - `ConsoleBackend`: stdout or any writer (fallback)
//! - `LogBridge`: the `log` crate facade, for hosts already running `env_logger`
//! - `MemoryBackend`: in-memory capture for tests and assertions

mod bridge;
mod console;
mod memory;
#[cfg(unix)]
mod syslog_backend;

pub use bridge::{init_env_logger, LogBridge, BRIDGE_TARGET};
pub use console::ConsoleBackend;
pub use memory::{MemoryBackend, Record};
#[cfg(unix)]
pub use syslog_backend::SyslogBackend;

use crate::error::LogError;
use crate::severity::Severity;

/// A sink that accepts one pre-formatted message per severity level.
///
/// Implementors provide [`write`](Backend::write); the eight per-level
/// methods delegate to it. Backends may filter by severity, but must not
/// alter the text they are given.
pub trait Backend: Send {
    /// Deliver `message` at `severity`.
    fn write(&mut self, severity: Severity, message: &str) -> Result<(), LogError>;

    /// Release the backend. Writes after a close should fail.
    fn close(&mut self) -> Result<(), LogError> {
        Ok(())
    }

    /// Short name used in diagnostics.
    fn name(&self) -> &'static str;

    fn emerg(&mut self, message: &str) -> Result<(), LogError> {
        self.write(Severity::Emergency, message)
    }

    fn alert(&mut self, message: &str) -> Result<(), LogError> {
        self.write(Severity::Alert, message)
    }

    fn crit(&mut self, message: &str) -> Result<(), LogError> {
        self.write(Severity::Critical, message)
    }

    fn err(&mut self, message: &str) -> Result<(), LogError> {
        self.write(Severity::Error, message)
    }

    fn warning(&mut self, message: &str) -> Result<(), LogError> {
        self.write(Severity::Warning, message)
    }

    fn notice(&mut self, message: &str) -> Result<(), LogError> {
        self.write(Severity::Notice, message)
    }

    fn info(&mut self, message: &str) -> Result<(), LogError> {
        self.write(Severity::Informational, message)
    }

    fn debug(&mut self, message: &str) -> Result<(), LogError> {
        self.write(Severity::Debug, message)
    }
}

impl<B: Backend + ?Sized> Backend for Box<B> {
    fn write(&mut self, severity: Severity, message: &str) -> Result<(), LogError> {
        (**self).write(severity, message)
    }

    fn close(&mut self) -> Result<(), LogError> {
        (**self).close()
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}
