//! Console-style text encoder shared by all write paths
//!
//! Produces one human-readable line per entry: ISO 8601 timestamp, capitalized
//! level name, caller `file:line`, message. Not a machine-parseable format.

use super::entry::LogEntry;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Timestamp format options for encoded entries
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// ISO 8601 with milliseconds: `2025-01-08T10:30:45.123Z`
    #[default]
    Iso8601,

    /// ISO 8601 with microseconds: `2025-01-08T10:30:45.123456Z`
    Iso8601Micros,

    /// Custom strftime format
    Custom(String),
}

impl TimestampFormat {
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::Iso8601 => datetime.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            TimestampFormat::Iso8601Micros => {
                datetime.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string()
            }
            TimestampFormat::Custom(format_str) => datetime.format(format_str).to_string(),
        }
    }
}

/// Stateless formatting policy applied to every entry
///
/// One encoder instance is built per logger configuration and shared by all
/// active routes via [`Encoder::shared`]. Reconfiguration rebuilds it wholesale.
#[derive(Debug, Clone)]
pub struct Encoder {
    timestamp_format: TimestampFormat,
    include_location: bool,
}

impl Default for Encoder {
    fn default() -> Self {
        Self {
            timestamp_format: TimestampFormat::default(),
            include_location: true,
        }
    }
}

impl Encoder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the timestamp format
    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Set whether to include caller `file:line` in output
    #[must_use]
    pub fn with_include_location(mut self, include: bool) -> Self {
        self.include_location = include;
        self
    }

    /// Wrap this encoder in an Arc for sharing across routes
    #[must_use]
    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Encode an entry as a single line, without trailing newline
    #[must_use]
    pub fn encode(&self, entry: &LogEntry) -> String {
        let timestamp = self.timestamp_format.format(&entry.timestamp);

        match (self.include_location, &entry.file, entry.line) {
            (true, Some(file), Some(line)) => format!(
                "[{}] [{:5}] [{}:{}] {}",
                timestamp,
                entry.level.to_str(),
                file,
                line,
                entry.message
            ),
            _ => format!(
                "[{}] [{:5}] {}",
                timestamp,
                entry.level.to_str(),
                entry.message
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::level::LogLevel;
    use chrono::TimeZone;

    fn fixed_entry(level: LogLevel) -> LogEntry {
        let mut entry = LogEntry::new(level, "hello".to_string());
        entry.timestamp = Utc
            .with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
            .single()
            .expect("valid datetime")
            + chrono::Duration::milliseconds(123);
        entry
    }

    #[test]
    fn test_encode_without_location() {
        let encoder = Encoder::new();
        let line = encoder.encode(&fixed_entry(LogLevel::Info));
        assert_eq!(line, "[2025-01-08T10:30:45.123Z] [INFO ] hello");
    }

    #[test]
    fn test_encode_with_location() {
        let encoder = Encoder::new();
        let entry = fixed_entry(LogLevel::Error).with_location("src/main.rs", 42);
        let line = encoder.encode(&entry);
        assert_eq!(line, "[2025-01-08T10:30:45.123Z] [ERROR] [src/main.rs:42] hello");
    }

    #[test]
    fn test_encode_location_suppressed() {
        let encoder = Encoder::new().with_include_location(false);
        let entry = fixed_entry(LogLevel::Warn).with_location("src/main.rs", 42);
        let line = encoder.encode(&entry);
        assert_eq!(line, "[2025-01-08T10:30:45.123Z] [WARN ] hello");
    }

    #[test]
    fn test_custom_timestamp_format() {
        let encoder =
            Encoder::new().with_timestamp_format(TimestampFormat::Custom("%Y/%m/%d".to_string()));
        let line = encoder.encode(&fixed_entry(LogLevel::Debug));
        assert!(line.starts_with("[2025/01/08] [DEBUG]"));
    }

    #[test]
    fn test_level_names_capitalized_and_padded() {
        let encoder = Encoder::new();
        for (level, expect) in [
            (LogLevel::Debug, "[DEBUG]"),
            (LogLevel::Info, "[INFO ]"),
            (LogLevel::Warn, "[WARN ]"),
            (LogLevel::Error, "[ERROR]"),
        ] {
            assert!(encoder.encode(&fixed_entry(level)).contains(expect));
        }
    }
}
