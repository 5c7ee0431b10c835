//! Logger facade.
//!
//! A [`Logger`] owns one backend, a stack of context prefixes, and an
//! operation counter. Every message is composed as
//! `"<prefix1>: <prefix2>: ... <message>"` before it reaches the backend.
//!
//! # Handles
//!
//! `Logger` is deliberately not `Clone`. Severity calls take `&self`, so a
//! shared reference can be handed to anything that only writes messages.
//! Anything that changes context (prefixes, operations) needs `&mut Logger`,
//! which keeps one logical stack per call chain.
//!
//! # Usage
//!
//! ```
//! use oplog_core::backend::MemoryBackend;
//! use oplog_core::logger::Logger;
//! use oplog_core::{log_info, push_prefix};
//!
//! let memory = MemoryBackend::new();
//! let mut logger = Logger::from_backend(memory.clone());
//!
//! push_prefix!(logger, "disk({})", "sda");
//! log_info!(logger, "partition {} created", 1).unwrap();
//! logger.pop_prefix();
//!
//! assert_eq!(memory.messages(), vec!["disk(sda): partition 1 created"]);
//! ```

mod command;
mod operation;
mod prefix;

pub use operation::{FAILED, FINISHED, STARTED};
pub use prefix::{PrefixGuard, PREFIX_SEPARATOR};

use std::fmt;

use parking_lot::Mutex;

#[cfg(unix)]
use crate::backend::SyslogBackend;
use crate::backend::{Backend, ConsoleBackend};
use crate::config::LoggerConfig;
use crate::error::LogError;
use crate::severity::Severity;

/// Prefix-stacking logger over a single backend.
pub struct Logger {
    backend: Mutex<Box<dyn Backend>>,
    prefixes: Vec<String>,
    op_seq: u64,
}

impl Logger {
    /// Open syslog with default settings, falling back to stdout.
    pub fn new() -> Self {
        Self::with_config(&LoggerConfig::default())
    }

    /// Open syslog with `config`, falling back to stdout.
    ///
    /// Never fails: if syslog is unavailable the console backend is used
    /// and the failure is reported through it at `err` severity.
    #[cfg(unix)]
    pub fn with_config(config: &LoggerConfig) -> Self {
        Self::open_or_fallback(SyslogBackend::open(config), ConsoleBackend::stdout())
    }

    #[cfg(not(unix))]
    pub fn with_config(config: &LoggerConfig) -> Self {
        let unsupported: Result<ConsoleBackend, LogError> = Err(LogError::Open {
            backend: "syslog",
            reason: format!("not supported on this platform (ident {})", config.ident),
        });
        Self::open_or_fallback(unsupported, ConsoleBackend::stdout())
    }

    /// Use `primary` if it opened, otherwise `fallback`.
    ///
    /// On fallback the open error is logged through the new logger itself,
    /// so it lands in the fallback sink.
    pub fn open_or_fallback<P, F, E>(primary: Result<P, E>, fallback: F) -> Self
    where
        P: Backend + 'static,
        F: Backend + 'static,
        E: fmt::Display,
    {
        match primary {
            Ok(backend) => {
                log::debug!("LOG_BACKEND_SELECTED backend={}", backend.name());
                Self::from_backend(backend)
            }
            Err(e) => {
                log::warn!(
                    "LOG_BACKEND_FALLBACK backend={} error={}",
                    fallback.name(),
                    e
                );
                let logger = Self::from_backend(fallback);
                let _ = logger.err(format_args!(
                    "log backend unavailable, falling back to {}: {}",
                    logger.backend_name(),
                    e
                ));
                logger
            }
        }
    }

    /// Wrap `backend` directly, with no selection.
    pub fn from_backend<B: Backend + 'static>(backend: B) -> Self {
        Self {
            backend: Mutex::new(Box::new(backend)),
            prefixes: Vec::new(),
            op_seq: 0,
        }
    }

    /// Name of the backend in use.
    pub fn backend_name(&self) -> &'static str {
        self.backend.lock().name()
    }

    /// Number of operations started so far; also the id of the latest one.
    pub fn op_count(&self) -> u64 {
        self.op_seq
    }

    /// Release the backend. Callers conventionally ignore the result.
    pub fn close(self) -> Result<(), LogError> {
        let mut backend = self.backend.into_inner();
        log::debug!("LOG_BACKEND_CLOSE backend={}", backend.name());
        backend.close()
    }

    /// Compose `args` with the current prefixes and write at `severity`.
    ///
    /// The backend's result is returned as-is.
    pub fn log(&self, severity: Severity, args: fmt::Arguments<'_>) -> Result<(), LogError> {
        let message = self.compose(args);
        self.backend.lock().write(severity, &message)
    }

    /// Log at emergency priority: the system is unusable.
    pub fn emerg(&self, args: fmt::Arguments<'_>) -> Result<(), LogError> {
        self.log(Severity::Emergency, args)
    }

    /// Log at alert priority: action must be taken immediately.
    pub fn alert(&self, args: fmt::Arguments<'_>) -> Result<(), LogError> {
        self.log(Severity::Alert, args)
    }

    /// Log at critical priority.
    pub fn crit(&self, args: fmt::Arguments<'_>) -> Result<(), LogError> {
        self.log(Severity::Critical, args)
    }

    /// Log at error priority.
    pub fn err(&self, args: fmt::Arguments<'_>) -> Result<(), LogError> {
        self.log(Severity::Error, args)
    }

    /// Log at warning priority.
    pub fn warning(&self, args: fmt::Arguments<'_>) -> Result<(), LogError> {
        self.log(Severity::Warning, args)
    }

    /// Log at notice priority: normal but significant.
    pub fn notice(&self, args: fmt::Arguments<'_>) -> Result<(), LogError> {
        self.log(Severity::Notice, args)
    }

    /// Log at informational priority.
    pub fn info(&self, args: fmt::Arguments<'_>) -> Result<(), LogError> {
        self.log(Severity::Informational, args)
    }

    /// Log at debug priority.
    pub fn debug(&self, args: fmt::Arguments<'_>) -> Result<(), LogError> {
        self.log(Severity::Debug, args)
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("backend", &self.backend_name())
            .field("prefixes", &self.prefixes)
            .field("op_seq", &self.op_seq)
            .finish()
    }
}

/// Log an emergency message through a logger.
#[macro_export]
macro_rules! log_emerg {
    ($logger:expr, $($arg:tt)*) => {
        $logger.emerg(format_args!($($arg)*))
    };
}

/// Log an alert message through a logger.
#[macro_export]
macro_rules! log_alert {
    ($logger:expr, $($arg:tt)*) => {
        $logger.alert(format_args!($($arg)*))
    };
}

/// Log a critical message through a logger.
#[macro_export]
macro_rules! log_crit {
    ($logger:expr, $($arg:tt)*) => {
        $logger.crit(format_args!($($arg)*))
    };
}

/// Log an error message through a logger.
#[macro_export]
macro_rules! log_err {
    ($logger:expr, $($arg:tt)*) => {
        $logger.err(format_args!($($arg)*))
    };
}

/// Log a warning message through a logger.
#[macro_export]
macro_rules! log_warning {
    ($logger:expr, $($arg:tt)*) => {
        $logger.warning(format_args!($($arg)*))
    };
}

/// Log a notice message through a logger.
#[macro_export]
macro_rules! log_notice {
    ($logger:expr, $($arg:tt)*) => {
        $logger.notice(format_args!($($arg)*))
    };
}

/// Log an info message through a logger.
#[macro_export]
macro_rules! log_info {
    ($logger:expr, $($arg:tt)*) => {
        $logger.info(format_args!($($arg)*))
    };
}

/// Log a debug message through a logger.
#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $($arg:tt)*) => {
        $logger.debug(format_args!($($arg)*))
    };
}

/// Push a formatted label onto a logger's prefix stack.
#[macro_export]
macro_rules! push_prefix {
    ($logger:expr, $($arg:tt)*) => {
        $logger.push_prefix(format_args!($($arg)*))
    };
}

/// Run a closure as a logged operation: `log_op!(logger, |l| ..., "fmt", args..)`.
#[macro_export]
macro_rules! log_op {
    ($logger:expr, $action:expr, $($arg:tt)*) => {
        $logger.log_op($action, format_args!($($arg)*))
    };
}

/// Run a `std::process::Command` as a logged operation.
#[macro_export]
macro_rules! log_cmd {
    ($logger:expr, $cmd:expr, $($arg:tt)*) => {
        $logger.log_cmd($cmd, format_args!($($arg)*))
    };
}
