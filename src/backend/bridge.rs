//! Adapter onto the `log` crate facade.

use crate::backend::Backend;
use crate::error::LogError;
use crate::severity::Severity;

/// `log` target used for bridged records.
pub const BRIDGE_TARGET: &str = "oplog";

/// Backend that hands each message to whatever `log` implementation the
/// host process installed.
///
/// Severities collapse onto the five `log` levels (see
/// [`Severity::to_log_level`]). Without an installed logger, messages are
/// silently discarded by the `log` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogBridge;

impl LogBridge {
    pub fn new() -> Self {
        Self
    }
}

impl Backend for LogBridge {
    fn write(&mut self, severity: Severity, message: &str) -> Result<(), LogError> {
        log::log!(target: BRIDGE_TARGET, severity.to_log_level(), "{}", message);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "log"
    }
}

/// Install `env_logger` as the process logger, defaulting to `Info`.
///
/// `RUST_LOG` still overrides the level. A logger installed earlier wins and
/// this call becomes a no-op.
pub fn init_env_logger() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .format_timestamp_millis()
        .try_init();
}
