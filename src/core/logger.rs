//! Level-routed logger
//!
//! One route per enabled level: a band predicate selecting exactly that level,
//! feeding a rotating file sink plus, for DEBUG and ERROR, a console mirror.
//! Every emit flushes the matching route's sinks before returning.

use crate::appenders::{Appender, ConsoleAppender, RotatingFileAppender};
use crate::core::config::RouterConfig;
use crate::core::encoder::Encoder;
use crate::core::entry::LogEntry;
use crate::core::error::Result;
use crate::core::level::{LevelBand, LevelMask, LogLevel};
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

/// One write path: a severity band bound to its sinks
struct Route {
    band: LevelBand,
    appenders: Mutex<Vec<Box<dyn Appender>>>,
}

pub struct Logger {
    mask: LevelMask,
    routes: Vec<Route>,
}

impl Logger {
    /// Build a logger from an explicit configuration
    ///
    /// Constructs the shared encoder and one route per level in the mask. An
    /// empty mask yields a logger with no routes; every emit is then a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the logs directory or a per-level file cannot be
    /// created or opened.
    pub fn from_config(config: &RouterConfig) -> Result<Self> {
        let encoder = Encoder::new()
            .with_timestamp_format(config.timestamp_format.clone())
            .shared();

        let mut routes = Vec::new();
        for level in config.mask.iter() {
            routes.push(Self::build_route(config, level, &encoder)?);
        }

        Ok(Self {
            mask: config.mask,
            routes,
        })
    }

    fn build_route(config: &RouterConfig, level: LogLevel, encoder: &Arc<Encoder>) -> Result<Route> {
        let file = RotatingFileAppender::new(
            config.dir.join(level.file_name()),
            config.rotation.clone(),
            Arc::clone(encoder),
        )?;

        let mut appenders: Vec<Box<dyn Appender>> = vec![Box::new(file)];

        // DEBUG mirrors to stdout, ERROR to stderr. INFO and WARN are file-only.
        match level {
            LogLevel::Debug => appenders.push(Box::new(
                ConsoleAppender::stdout(Arc::clone(encoder)).with_colors(config.console_colors),
            )),
            LogLevel::Error => appenders.push(Box::new(
                ConsoleAppender::stderr(Arc::clone(encoder)).with_colors(config.console_colors),
            )),
            LogLevel::Info | LogLevel::Warn => {}
        }

        Ok(Route {
            band: LevelBand::for_level(level),
            appenders: Mutex::new(appenders),
        })
    }

    /// Active level mask this logger was built with
    #[must_use]
    pub fn mask(&self) -> LevelMask {
        self.mask
    }

    /// Dispatch an entry to every route whose band contains its level, then
    /// flush those routes' sinks
    ///
    /// Bands are disjoint, so at most one route matches. Sink and flush
    /// failures never reach the caller; they are reported to stderr and the
    /// entry is lost.
    pub fn log(&self, entry: LogEntry) {
        for route in &self.routes {
            if !route.band.contains(entry.level) {
                continue;
            }

            let mut appenders = route.appenders.lock();
            for appender in appenders.iter_mut() {
                if let Err(e) = appender.append(&entry) {
                    eprintln!("[LOGGER ERROR] Appender '{}' failed: {}", appender.name(), e);
                }
            }
            // Durability over throughput: each entry is flushed before the
            // emit call returns
            for appender in appenders.iter_mut() {
                if let Err(e) = appender.flush() {
                    eprintln!(
                        "[LOGGER ERROR] Appender '{}' flush failed: {}",
                        appender.name(),
                        e
                    );
                }
            }
        }
    }

    #[track_caller]
    fn emit(&self, level: LogLevel, message: impl fmt::Display) {
        if !self.mask.contains(level) {
            return;
        }
        self.log(LogEntry::from_caller(level, message.to_string()));
    }

    #[track_caller]
    pub fn debug(&self, message: impl fmt::Display) {
        self.emit(LogLevel::Debug, message);
    }

    #[track_caller]
    pub fn info(&self, message: impl fmt::Display) {
        self.emit(LogLevel::Info, message);
    }

    #[track_caller]
    pub fn warn(&self, message: impl fmt::Display) {
        self.emit(LogLevel::Warn, message);
    }

    #[track_caller]
    pub fn err(&self, message: impl fmt::Display) {
        self.emit(LogLevel::Error, message);
    }

    /// Appender names per route, keyed by the route's band level
    #[cfg(test)]
    fn route_appender_names(&self) -> Vec<(LogLevel, Vec<String>)> {
        self.routes
            .iter()
            .map(|route| {
                let names = route
                    .appenders
                    .lock()
                    .iter()
                    .map(|appender| appender.name().to_string())
                    .collect();
                (route.band.low, names)
            })
            .collect()
    }

    /// Flush every sink on every route
    pub fn flush(&self) -> Result<()> {
        for route in &self.routes {
            let mut appenders = route.appenders.lock();
            for appender in appenders.iter_mut() {
                appender.flush()?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn config_for(dir: &Path, mask: LevelMask) -> RouterConfig {
        RouterConfig::new().with_dir(dir).with_mask(mask)
    }

    fn read_or_empty(path: &Path) -> String {
        fs::read_to_string(path).unwrap_or_default()
    }

    #[test]
    fn test_routes_created_per_masked_level() {
        let dir = tempdir().unwrap();
        let logger =
            Logger::from_config(&config_for(dir.path(), LevelMask::default())).unwrap();

        assert!(dir.path().join("info.log").exists());
        assert!(dir.path().join("error.log").exists());
        assert!(!dir.path().join("debug.log").exists());
        assert!(!dir.path().join("warn.log").exists());
        assert_eq!(logger.mask().bits(), 10);
    }

    #[test]
    fn test_console_mirrors_wired_per_level() {
        let dir = tempdir().unwrap();
        let logger = Logger::from_config(&config_for(dir.path(), LevelMask::ALL)).unwrap();

        let routes = logger.route_appender_names();
        assert_eq!(routes.len(), 4);
        for (level, names) in routes {
            match level {
                LogLevel::Debug => assert_eq!(names, ["rotating_file", "console_stdout"]),
                LogLevel::Info | LogLevel::Warn => assert_eq!(names, ["rotating_file"]),
                LogLevel::Error => assert_eq!(names, ["rotating_file", "console_stderr"]),
            }
        }
    }

    #[test]
    fn test_emit_routes_to_exact_level_file() {
        let dir = tempdir().unwrap();
        let logger = Logger::from_config(&config_for(dir.path(), LevelMask::ALL)).unwrap();

        logger.info("an info line");
        logger.warn("a warn line");

        let info = read_or_empty(&dir.path().join("info.log"));
        let warn = read_or_empty(&dir.path().join("warn.log"));
        let error = read_or_empty(&dir.path().join("error.log"));

        assert!(info.contains("an info line"));
        assert!(!info.contains("a warn line"));
        assert!(warn.contains("a warn line"));
        assert!(error.is_empty());
    }

    #[test]
    fn test_disabled_level_is_dropped() {
        let dir = tempdir().unwrap();
        let logger =
            Logger::from_config(&config_for(dir.path(), LevelMask::INFO)).unwrap();

        logger.err("should vanish");
        logger.debug("also gone");
        logger.info("kept");

        assert!(!dir.path().join("error.log").exists());
        assert!(!dir.path().join("debug.log").exists());
        assert!(read_or_empty(&dir.path().join("info.log")).contains("kept"));
    }

    #[test]
    fn test_error_band_does_not_capture_warn() {
        let dir = tempdir().unwrap();
        let logger =
            Logger::from_config(&config_for(dir.path(), LevelMask::ERROR)).unwrap();

        logger.warn("warn with only error enabled");
        logger.err("real error");

        let error = read_or_empty(&dir.path().join("error.log"));
        assert!(!error.contains("warn with only error enabled"));
        assert!(error.contains("real error"));
        assert!(!dir.path().join("warn.log").exists());
    }

    #[test]
    fn test_empty_mask_is_silent_noop() {
        let dir = tempdir().unwrap();
        let logger =
            Logger::from_config(&config_for(dir.path(), LevelMask::EMPTY)).unwrap();

        logger.debug("x");
        logger.info("x");
        logger.warn("x");
        logger.err("x");

        let entries = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 0);
    }

    #[test]
    fn test_emit_is_durable_without_explicit_flush() {
        let dir = tempdir().unwrap();
        let logger =
            Logger::from_config(&config_for(dir.path(), LevelMask::INFO)).unwrap();

        logger.info("persisted immediately");

        // No flush() call here: the emit itself must have flushed
        assert!(read_or_empty(&dir.path().join("info.log")).contains("persisted immediately"));
    }

    #[test]
    fn test_caller_attribution_points_at_call_site() {
        let dir = tempdir().unwrap();
        let logger =
            Logger::from_config(&config_for(dir.path(), LevelMask::WARN)).unwrap();

        logger.warn("attributed");

        let warn = read_or_empty(&dir.path().join("warn.log"));
        assert!(warn.contains("logger.rs:"), "got: {}", warn);
    }

    #[test]
    fn test_concurrent_emits() {
        let dir = tempdir().unwrap();
        let logger = Arc::new(
            Logger::from_config(&config_for(dir.path(), LevelMask::INFO)).unwrap(),
        );

        let handles: Vec<_> = (0..4)
            .map(|t| {
                let logger = Arc::clone(&logger);
                std::thread::spawn(move || {
                    for i in 0..25 {
                        logger.info(format!("thread {} line {}", t, i));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let info = read_or_empty(&dir.path().join("info.log"));
        assert_eq!(info.lines().count(), 100);
    }
}
