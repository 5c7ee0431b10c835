//! oplog core - prefix-stacked logging for infrastructure daemons
//!
//! This crate provides a small logging facade that daemons use to produce
//! uniform, context-annotated diagnostic output. The implementation
//! prioritizes:
//!
//! 1. **Availability** - syslog first, console fallback, never fails to construct
//! 2. **Context** - a prefix stack prepended to every message
//! 3. **Narration** - `[started]`/`[finished]`/`[failed]` markers with unique op ids
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `severity` - The eight syslog severity levels
//! - `backend` - Sinks: syslog, console, `log` bridge, in-memory
//! - `logger` - The facade: prefixes, severity calls, operation wrappers
//! - `config` - Syslog identity and facility, with env overrides
//! - `error` - Backend and command failures
//!
//! ## Example
//!
//! ```no_run
//! use std::process::Command;
//! use oplog_core::logger::Logger;
//! use oplog_core::{log_cmd, log_info, push_prefix};
//!
//! let mut logger = Logger::new();
//! push_prefix!(logger, "disks");
//! log_info!(logger, "probing {} devices", 2).ok();
//!
//! let mut mkfs = Command::new("mkfs.ext4");
//! mkfs.arg("/dev/vdb");
//! if let Err(e) = log_cmd!(logger, &mut mkfs, "creating filesystem on {}", "/dev/vdb") {
//!     eprintln!("{}", e);
//! }
//! logger.pop_prefix();
//! let _ = logger.close();
//! ```

pub mod backend;
pub mod config;
pub mod error;
pub mod logger;
pub mod severity;

pub use backend::{Backend, ConsoleBackend, LogBridge, MemoryBackend};
#[cfg(unix)]
pub use backend::SyslogBackend;
pub use config::LoggerConfig;
pub use error::{CommandError, ConfigError, LogError};
pub use logger::{Logger, PrefixGuard};
pub use severity::Severity;
