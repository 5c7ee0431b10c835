//! In-memory capture backend.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::backend::Backend;
use crate::error::LogError;
use crate::severity::Severity;

/// One captured message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub severity: Severity,
    pub message: String,
}

#[derive(Debug, Default)]
struct State {
    records: Vec<Record>,
    closed: bool,
}

/// Backend that keeps every message in memory.
///
/// Clones share one buffer, so a test can hand one clone to a
/// [`Logger`](crate::logger::Logger) and inspect the other.
///
/// ```
/// use oplog_core::backend::MemoryBackend;
/// use oplog_core::logger::Logger;
/// use oplog_core::log_info;
///
/// let memory = MemoryBackend::new();
/// let logger = Logger::from_backend(memory.clone());
/// log_info!(logger, "hello {}", 42).unwrap();
/// assert_eq!(memory.messages(), vec!["hello 42"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    state: Arc<Mutex<State>>,
    fail_writes: bool,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend whose writes are all rejected with [`LogError::Write`].
    pub fn failing() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    /// Snapshot of everything captured so far.
    pub fn records(&self) -> Vec<Record> {
        self.state.lock().records.clone()
    }

    /// Captured message texts, in order.
    pub fn messages(&self) -> Vec<String> {
        self.state
            .lock()
            .records
            .iter()
            .map(|r| r.message.clone())
            .collect()
    }

    /// Captured message texts at exactly `severity`.
    pub fn messages_at(&self, severity: Severity) -> Vec<String> {
        self.state
            .lock()
            .records
            .iter()
            .filter(|r| r.severity == severity)
            .map(|r| r.message.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.state.lock().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().records.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    pub fn clear(&self) {
        self.state.lock().records.clear();
    }
}

impl Backend for MemoryBackend {
    fn write(&mut self, severity: Severity, message: &str) -> Result<(), LogError> {
        let mut state = self.state.lock();
        if state.closed {
            return Err(LogError::Closed);
        }
        if self.fail_writes {
            return Err(LogError::Write {
                severity,
                reason: "memory backend rejects writes".to_string(),
            });
        }
        state.records.push(Record {
            severity,
            message: message.to_string(),
        });
        Ok(())
    }

    fn close(&mut self) -> Result<(), LogError> {
        let mut state = self.state.lock();
        if state.closed {
            return Err(LogError::Closed);
        }
        state.closed = true;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_buffer() {
        let memory = MemoryBackend::new();
        let mut writer = memory.clone();

        writer.notice("shared").unwrap();
        assert_eq!(memory.len(), 1);
        assert_eq!(
            memory.records()[0],
            Record {
                severity: Severity::Notice,
                message: "shared".to_string()
            }
        );

        memory.clear();
        assert!(memory.is_empty());
    }

    #[test]
    fn test_failing_backend_records_nothing() {
        let memory = MemoryBackend::failing();
        let mut writer = memory.clone();

        let err = writer.alert("dropped").unwrap_err();
        assert!(matches!(
            err,
            LogError::Write {
                severity: Severity::Alert,
                ..
            }
        ));
        assert!(memory.is_empty());
    }

    #[test]
    fn test_close_is_visible_through_clones() {
        let memory = MemoryBackend::new();
        let mut writer = memory.clone();

        writer.close().unwrap();
        assert!(memory.is_closed());
        assert!(matches!(writer.info("late"), Err(LogError::Closed)));
    }
}
