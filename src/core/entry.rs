//! Log entry structure

use super::level::LogLevel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub file: Option<String>,
    pub line: Option<u32>,
}

impl LogEntry {
    /// Sanitize log message to prevent log injection attacks
    ///
    /// Replaces newlines, carriage returns, and tabs with escape sequences
    /// to prevent attackers from injecting fake log entries.
    fn sanitize_message(message: &str) -> String {
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    pub fn new(level: LogLevel, message: String) -> Self {
        Self {
            level,
            message: Self::sanitize_message(&message),
            timestamp: Utc::now(),
            file: None,
            line: None,
        }
    }

    /// Attach the call site that produced this entry
    #[must_use]
    pub fn with_location(mut self, file: &str, line: u32) -> Self {
        self.file = Some(file.to_string());
        self.line = Some(line);
        self
    }

    /// Build an entry attributed to the caller of the emitting function
    ///
    /// Relies on `#[track_caller]` propagation: the recorded location is one
    /// frame above the emit wrapper, not the wrapper itself.
    #[track_caller]
    pub fn from_caller(level: LogLevel, message: String) -> Self {
        let location = std::panic::Location::caller();
        Self::new(level, message).with_location(location.file(), location.line())
    }
}
