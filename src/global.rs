//! Process-wide logger handle
//!
//! Holds one installed [`Logger`] behind a read-write lock: emits take a read
//! handle, (re)configuration takes the write handle and replaces the instance
//! wholesale. The first emit without an explicit [`init`] installs a logger
//! built from [`RouterConfig::default`] (mask INFO|ERROR, `./logs` directory).

use crate::core::config::RouterConfig;
use crate::core::entry::LogEntry;
use crate::core::error::Result;
use crate::core::level::{LevelMask, LogLevel};
use crate::core::logger::Logger;
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

struct Installed {
    config: RouterConfig,
    logger: Arc<Logger>,
}

static GLOBAL: RwLock<Option<Installed>> = RwLock::new(None);

/// Install the process-wide logger from an explicit configuration
///
/// # Errors
///
/// Returns an error if the logs directory or a per-level file cannot be opened;
/// a previously installed logger stays in place on failure.
pub fn init(config: RouterConfig) -> Result<()> {
    let logger = Arc::new(Logger::from_config(&config)?);
    *GLOBAL.write() = Some(Installed { config, logger });
    Ok(())
}

/// Rebuild the process-wide logger with a new level mask
///
/// The encoder and every route are rebuilt from the installed configuration
/// (or the default configuration if none was installed) and the old instance
/// is discarded. Entries emitted before the call stay in their original files.
/// Any mask is accepted, including [`LevelMask::EMPTY`], which turns every
/// emit into a silent no-op.
///
/// # Errors
///
/// Returns an error if a per-level file cannot be opened; the previous logger
/// stays in place on failure.
pub fn reconfigure(mask: LevelMask) -> Result<()> {
    let mut guard = GLOBAL.write();
    let config = guard
        .as_ref()
        .map(|installed| installed.config.clone())
        .unwrap_or_default()
        .with_mask(mask);
    let logger = Arc::new(Logger::from_config(&config)?);
    *guard = Some(Installed { config, logger });
    Ok(())
}

/// Currently active level mask
pub fn mask() -> LevelMask {
    GLOBAL
        .read()
        .as_ref()
        .map(|installed| installed.logger.mask())
        .unwrap_or_default()
}

/// Flush every sink of the installed logger
pub fn flush() -> Result<()> {
    if let Some(installed) = GLOBAL.read().as_ref() {
        installed.logger.flush()?;
    }
    Ok(())
}

fn handle() -> Option<Arc<Logger>> {
    if let Some(installed) = GLOBAL.read().as_ref() {
        return Some(Arc::clone(&installed.logger));
    }

    // Lazy startup path: install a default logger on first emit
    let mut guard = GLOBAL.write();
    if guard.is_none() {
        let config = RouterConfig::default();
        match Logger::from_config(&config) {
            Ok(logger) => {
                *guard = Some(Installed {
                    config,
                    logger: Arc::new(logger),
                });
            }
            Err(e) => {
                eprintln!("[LOGGER ERROR] Failed to initialize default logger: {}", e);
                return None;
            }
        }
    }
    guard.as_ref().map(|installed| Arc::clone(&installed.logger))
}

#[track_caller]
fn emit(level: LogLevel, args: fmt::Arguments<'_>) {
    let Some(logger) = handle() else { return };
    if !logger.mask().contains(level) {
        // Never formatted, never written
        return;
    }
    logger.log(LogEntry::from_caller(level, args.to_string()));
}

/// Emit a DEBUG entry; use the [`crate::debug!`] macro for format arguments
#[track_caller]
pub fn debug(args: fmt::Arguments<'_>) {
    emit(LogLevel::Debug, args);
}

/// Emit an INFO entry; use the [`crate::info!`] macro for format arguments
#[track_caller]
pub fn info(args: fmt::Arguments<'_>) {
    emit(LogLevel::Info, args);
}

/// Emit a WARN entry; use the [`crate::warn!`] macro for format arguments
#[track_caller]
pub fn warn(args: fmt::Arguments<'_>) {
    emit(LogLevel::Warn, args);
}

/// Emit an ERROR entry; use the [`crate::err!`] macro for format arguments
#[track_caller]
pub fn err(args: fmt::Arguments<'_>) {
    emit(LogLevel::Error, args);
}
