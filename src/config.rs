//! Logger configuration.
//!
//! Everything has a working default; `from_env` layers environment
//! overrides on top:
//! - `OPLOG_IDENT` - syslog identity (tag)
//! - `OPLOG_FACILITY` - syslog facility name (`daemon`, `local0`, `log_user`, ...)
//! - `OPLOG_SOCKET` - syslog socket path, instead of the platform default

use std::path::PathBuf;

use syslog::Facility;

use crate::error::ConfigError;

/// Syslog identity used when nothing else is configured.
pub const DEFAULT_IDENT: &str = "ignition";

pub const ENV_IDENT: &str = "OPLOG_IDENT";
pub const ENV_FACILITY: &str = "OPLOG_FACILITY";
pub const ENV_SOCKET: &str = "OPLOG_SOCKET";

/// Settings for opening the primary (syslog) backend.
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub ident: String,
    pub facility: Facility,
    /// Hostname stamped into RFC 3164 headers; `None` leaves it to syslogd.
    pub hostname: Option<String>,
    /// Unix socket of the syslog daemon; `None` tries the usual locations.
    pub socket_path: Option<PathBuf>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            ident: DEFAULT_IDENT.to_string(),
            facility: Facility::LOG_USER,
            hostname: None,
            socket_path: None,
        }
    }
}

impl LoggerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by `OPLOG_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each `OPLOG_*` key.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(ident) = lookup(ENV_IDENT).filter(|s| !s.trim().is_empty()) {
            config.ident = ident.trim().to_string();
        }
        if let Some(name) = lookup(ENV_FACILITY) {
            config.facility = parse_facility(&name)?;
        }
        if let Some(path) = lookup(ENV_SOCKET).filter(|s| !s.trim().is_empty()) {
            config.socket_path = Some(PathBuf::from(path.trim()));
        }

        log::debug!(
            "LOGGER_CONFIG ident={} facility={:?}",
            config.ident,
            config.facility
        );
        Ok(config)
    }

    pub fn with_ident(mut self, ident: impl Into<String>) -> Self {
        self.ident = ident.into();
        self
    }

    pub fn with_facility(mut self, facility: Facility) -> Self {
        self.facility = facility;
        self
    }

    pub fn with_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = Some(hostname.into());
        self
    }

    pub fn with_socket_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.socket_path = Some(path.into());
        self
    }
}

/// Parse a facility name, with or without the `log_` prefix.
pub fn parse_facility(name: &str) -> Result<Facility, ConfigError> {
    name.trim()
        .parse::<Facility>()
        .map_err(|()| ConfigError::UnknownFacility(name.to_string()))
}
