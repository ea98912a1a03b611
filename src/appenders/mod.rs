//! Sink implementations for formatted log output

pub mod console;
pub mod rotating_file;

pub use console::{ConsoleAppender, ConsoleTarget};
pub use rotating_file::RotatingFileAppender;

use crate::core::{entry::LogEntry, error::Result};

/// A destination for encoded log entries
///
/// Appenders must tolerate concurrent use behind the logger's locks; `flush`
/// blocks until buffered output reaches the target.
pub trait Appender: Send + Sync {
    fn append(&mut self, entry: &LogEntry) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}
