//! Error types.

use std::io;
use std::process::ExitStatus;

use thiserror::Error;

use crate::severity::Severity;

/// Failures reported by a logging backend.
#[derive(Debug, Error)]
pub enum LogError {
    /// The backend could not be opened.
    #[error("unable to open {backend}: {reason}")]
    Open {
        backend: &'static str,
        reason: String,
    },

    /// A single write was rejected by the backend.
    #[error("{severity} write failed: {reason}")]
    Write { severity: Severity, reason: String },

    /// Console sink failure.
    #[error("console write failed: {0}")]
    Io(#[from] io::Error),

    /// The backend was already closed.
    #[error("log backend is closed")]
    Closed,
}

/// Failure running an external command under [`Logger::log_cmd`].
///
/// The display form embeds whatever the process wrote so a single log line
/// carries the process's own diagnostics.
///
/// [`Logger::log_cmd`]: crate::logger::Logger::log_cmd
#[derive(Debug, Error)]
pub enum CommandError {
    /// The process could not be started or waited on.
    #[error("{program}: {source}: Stdout: {stdout:?} Stderr: {stderr:?}")]
    Io {
        program: String,
        #[source]
        source: io::Error,
        stdout: String,
        stderr: String,
    },

    /// The process ran but exited unsuccessfully.
    #[error("{status}: Stdout: {stdout:?} Stderr: {stderr:?}")]
    Exit {
        status: ExitStatus,
        stdout: String,
        stderr: String,
    },
}

impl CommandError {
    /// Captured standard output.
    pub fn stdout(&self) -> &str {
        match self {
            CommandError::Io { stdout, .. } | CommandError::Exit { stdout, .. } => stdout,
        }
    }

    /// Captured standard error.
    pub fn stderr(&self) -> &str {
        match self {
            CommandError::Io { stderr, .. } | CommandError::Exit { stderr, .. } => stderr,
        }
    }

    /// Exit status, if the process ran to completion.
    pub fn status(&self) -> Option<ExitStatus> {
        match self {
            CommandError::Exit { status, .. } => Some(*status),
            CommandError::Io { .. } => None,
        }
    }
}

/// Invalid logger configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown syslog facility: {0}")]
    UnknownFacility(String),
}

/// Unrecognised severity name.
#[derive(Debug, Error)]
#[error("unknown severity: {0}")]
pub struct ParseSeverityError(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_error_display() {
        let err = LogError::Write {
            severity: Severity::Critical,
            reason: "socket gone".to_string(),
        };
        assert_eq!(err.to_string(), "crit write failed: socket gone");
    }

    #[test]
    fn test_command_io_error_quotes_output() {
        let err = CommandError::Io {
            program: "/bin/missing".to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
            stdout: String::new(),
            stderr: "line \"one\"\n".to_string(),
        };
        assert_eq!(
            err.to_string(),
            r#"/bin/missing: not found: Stdout: "" Stderr: "line \"one\"\n""#
        );
        assert!(err.status().is_none());
        assert_eq!(err.stderr(), "line \"one\"\n");
    }
}
