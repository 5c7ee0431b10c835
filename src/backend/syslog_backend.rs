//! Syslog backend.

use syslog::{Formatter3164, Logger as SyslogLogger, LoggerBackend};

use crate::backend::Backend;
use crate::config::LoggerConfig;
use crate::error::LogError;
use crate::severity::Severity;

/// Forwards messages to the local syslog daemon over its unix socket.
///
/// Messages are framed as RFC 3164 with the configured ident and facility.
/// No severity filtering happens here; that is syslogd's job.
pub struct SyslogBackend {
    inner: Option<SyslogLogger<LoggerBackend, Formatter3164>>,
}

impl SyslogBackend {
    /// Connect to the local syslog socket, or to `config.socket_path` when set.
    pub fn open(config: &LoggerConfig) -> Result<Self, LogError> {
        let formatter = Formatter3164 {
            facility: config.facility,
            hostname: config.hostname.clone(),
            process: config.ident.clone(),
            pid: std::process::id(),
        };

        let opened = match &config.socket_path {
            Some(path) => syslog::unix_custom(formatter, path),
            None => syslog::unix(formatter),
        };
        let logger = opened.map_err(|e| LogError::Open {
            backend: "syslog",
            reason: e.to_string(),
        })?;
        log::debug!(
            "SYSLOG_OPENED ident={} facility={:?} socket={:?}",
            config.ident,
            config.facility,
            config.socket_path
        );

        Ok(Self {
            inner: Some(logger),
        })
    }
}

impl Backend for SyslogBackend {
    fn write(&mut self, severity: Severity, message: &str) -> Result<(), LogError> {
        let logger = self.inner.as_mut().ok_or(LogError::Closed)?;

        let result = match severity {
            Severity::Emergency => logger.emerg(message),
            Severity::Alert => logger.alert(message),
            Severity::Critical => logger.crit(message),
            Severity::Error => logger.err(message),
            Severity::Warning => logger.warning(message),
            Severity::Notice => logger.notice(message),
            Severity::Informational => logger.info(message),
            Severity::Debug => logger.debug(message),
        };

        result.map_err(|e| LogError::Write {
            severity,
            reason: e.to_string(),
        })
    }

    fn close(&mut self) -> Result<(), LogError> {
        // Dropping the logger closes the socket.
        self.inner.take().map(drop).ok_or(LogError::Closed)
    }

    fn name(&self) -> &'static str {
        "syslog"
    }
}

impl std::fmt::Debug for SyslogBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyslogBackend")
            .field("open", &self.inner.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::unix::net::UnixDatagram;
    use std::time::Duration;

    use tempfile::TempDir;

    /// A bound datagram socket standing in for syslogd.
    fn fake_syslogd() -> (TempDir, UnixDatagram, LoggerConfig) {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("log");
        let socket = UnixDatagram::bind(&path).expect("Failed to bind datagram socket");
        socket
            .set_read_timeout(Some(Duration::from_secs(5)))
            .expect("Failed to set read timeout");

        let config = LoggerConfig::new()
            .with_ident("oplog-test")
            .with_socket_path(path);
        (dir, socket, config)
    }

    fn recv_line(socket: &UnixDatagram) -> String {
        let mut buf = [0u8; 2048];
        let n = socket.recv(&mut buf).expect("No datagram received");
        String::from_utf8_lossy(&buf[..n])
            .trim_end_matches(['\n', '\0'])
            .to_string()
    }

    #[test]
    fn test_each_severity_maps_to_its_priority() {
        let (_dir, socket, config) = fake_syslogd();
        let mut backend = SyslogBackend::open(&config).unwrap();

        // LOG_USER is facility 1, so PRI = 8 + severity code (emerg = 0).
        for (code, level) in Severity::ALL.iter().enumerate() {
            let message = format!("op(1): [started] level {}", level);
            backend.write(*level, &message).unwrap();

            let line = recv_line(&socket);
            let pri = format!("<{}>", 8 + code);
            assert!(line.starts_with(&pri), "{} should start with {}", line, pri);
            assert!(line.contains("oplog-test["), "missing ident in {}", line);
            assert!(
                line.ends_with(&format!(": {}", message)),
                "message altered in {}",
                line
            );
        }
    }

    #[test]
    fn test_facility_is_encoded() {
        let (_dir, socket, config) = fake_syslogd();
        let config = config.with_facility(syslog::Facility::LOG_DAEMON);
        let mut backend = SyslogBackend::open(&config).unwrap();

        backend.notice("daemon notice").unwrap();
        // LOG_DAEMON is facility 3: 24 + notice (5).
        assert!(recv_line(&socket).starts_with("<29>"));
    }

    #[test]
    fn test_write_after_close_fails() {
        let (_dir, _socket, config) = fake_syslogd();
        let mut backend = SyslogBackend::open(&config).unwrap();

        backend.close().unwrap();
        assert!(matches!(backend.err("late"), Err(LogError::Closed)));
        assert!(matches!(backend.close(), Err(LogError::Closed)));
        assert_eq!(format!("{:?}", backend), "SyslogBackend { open: false }");
    }

    #[test]
    fn test_open_missing_socket_fails() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let config = LoggerConfig::new().with_socket_path(dir.path().join("absent"));

        let err = SyslogBackend::open(&config).unwrap_err();
        assert!(matches!(err, LogError::Open { backend: "syslog", .. }));
        assert!(err.to_string().starts_with("unable to open syslog: "));
    }
}
