//! Message severity levels.
//!
//! The eight syslog priorities, from `Emergency` (most severe) down to
//! `Debug` (least severe).

use std::fmt;
use std::str::FromStr;

use crate::error::ParseSeverityError;

/// Severity of a log message.
///
/// Ordering follows importance: `Debug < Informational < ... < Emergency`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    Debug,
    Informational,
    Notice,
    Warning,
    Error,
    Critical,
    Alert,
    Emergency,
}

impl Severity {
    /// All levels, most severe first.
    pub const ALL: [Severity; 8] = [
        Severity::Emergency,
        Severity::Alert,
        Severity::Critical,
        Severity::Error,
        Severity::Warning,
        Severity::Notice,
        Severity::Informational,
        Severity::Debug,
    ];

    /// Short syslog keyword for this level.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Emergency => "emerg",
            Severity::Alert => "alert",
            Severity::Critical => "crit",
            Severity::Error => "err",
            Severity::Warning => "warning",
            Severity::Notice => "notice",
            Severity::Informational => "info",
            Severity::Debug => "debug",
        }
    }

    /// Closest `log` crate level. The `log` facade has only five levels,
    /// so everything at `err` or above collapses onto `Error`.
    pub fn to_log_level(&self) -> log::Level {
        match self {
            Severity::Emergency | Severity::Alert | Severity::Critical | Severity::Error => {
                log::Level::Error
            }
            Severity::Warning => log::Level::Warn,
            Severity::Notice | Severity::Informational => log::Level::Info,
            Severity::Debug => log::Level::Debug,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "emerg" | "emergency" => Ok(Severity::Emergency),
            "alert" => Ok(Severity::Alert),
            "crit" | "critical" => Ok(Severity::Critical),
            "err" | "error" => Ok(Severity::Error),
            "warning" | "warn" => Ok(Severity::Warning),
            "notice" => Ok(Severity::Notice),
            "info" | "informational" => Ok(Severity::Informational),
            "debug" => Ok(Severity::Debug),
            _ => Err(ParseSeverityError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Debug < Severity::Informational);
        assert!(Severity::Warning < Severity::Error);
        assert!(Severity::Alert < Severity::Emergency);

        let mut sorted = Severity::ALL;
        sorted.sort();
        sorted.reverse();
        assert_eq!(sorted, Severity::ALL);
    }

    #[test]
    fn test_severity_parse() {
        assert_eq!("crit".parse::<Severity>().unwrap(), Severity::Critical);
        assert_eq!("WARNING".parse::<Severity>().unwrap(), Severity::Warning);
        assert_eq!("informational".parse::<Severity>().unwrap(), Severity::Informational);
        assert!("verbose".parse::<Severity>().is_err());
    }

    #[test]
    fn test_severity_round_trips_keyword() {
        for level in Severity::ALL {
            assert_eq!(level.as_str().parse::<Severity>().unwrap(), level);
        }
    }

    #[test]
    fn test_log_level_mapping() {
        assert_eq!(Severity::Emergency.to_log_level(), log::Level::Error);
        assert_eq!(Severity::Warning.to_log_level(), log::Level::Warn);
        assert_eq!(Severity::Notice.to_log_level(), log::Level::Info);
        assert_eq!(Severity::Debug.to_log_level(), log::Level::Debug);
    }
}
