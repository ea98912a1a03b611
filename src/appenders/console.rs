//! Console appender with a fixed target stream
//!
//! Routes pick the stream: the DEBUG route mirrors to stdout, the ERROR route to
//! stderr. INFO and WARN never get a console mirror.

use crate::appenders::Appender;
use crate::core::encoder::Encoder;
use crate::core::entry::LogEntry;
use crate::core::error::Result;
use colored::Colorize;
use std::io::Write;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleTarget {
    Stdout,
    Stderr,
}

pub struct ConsoleAppender {
    target: ConsoleTarget,
    encoder: Arc<Encoder>,
    use_colors: bool,
}

impl ConsoleAppender {
    pub fn stdout(encoder: Arc<Encoder>) -> Self {
        Self {
            target: ConsoleTarget::Stdout,
            encoder,
            use_colors: false,
        }
    }

    pub fn stderr(encoder: Arc<Encoder>) -> Self {
        Self {
            target: ConsoleTarget::Stderr,
            encoder,
            use_colors: false,
        }
    }

    /// Enable colored level names in the encoded line
    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    #[must_use]
    pub fn target(&self) -> ConsoleTarget {
        self.target
    }

    fn format(&self, entry: &LogEntry) -> String {
        let line = self.encoder.encode(entry);
        if self.use_colors {
            line.color(entry.level.color_code()).to_string()
        } else {
            line
        }
    }
}

impl Appender for ConsoleAppender {
    fn append(&mut self, entry: &LogEntry) -> Result<()> {
        let line = self.format(entry);
        // writeln into a locked handle surfaces a closed stream as an error
        // instead of panicking mid-emit
        match self.target {
            ConsoleTarget::Stdout => writeln!(std::io::stdout().lock(), "{}", line)?,
            ConsoleTarget::Stderr => writeln!(std::io::stderr().lock(), "{}", line)?,
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        match self.target {
            ConsoleTarget::Stdout => std::io::stdout().flush()?,
            ConsoleTarget::Stderr => std::io::stderr().flush()?,
        }
        Ok(())
    }

    fn name(&self) -> &str {
        match self.target {
            ConsoleTarget::Stdout => "console_stdout",
            ConsoleTarget::Stderr => "console_stderr",
        }
    }
}
