//! # sievelog
//!
//! A leveled, multi-sink logger: each enabled severity gets its own rotating
//! log file, with DEBUG mirrored to stdout and ERROR to stderr.
//!
//! ## Features
//!
//! - **Exact-band routing**: each level's file receives that level and nothing
//!   else; enabling ERROR does not capture WARN
//! - **Rotating files**: size-triggered rotation with bounded backups, age
//!   pruning and optional gzip
//! - **Durable emits**: every log call flushes its sinks before returning
//! - **Runtime reconfiguration**: swap the enabled level set wholesale
//!
//! ## Quick start
//!
//! ```no_run
//! use sievelog::{info, err, reconfigure, LevelMask};
//!
//! // First emit lazily installs the default logger (INFO|ERROR, ./logs)
//! info!("starting up");
//! err!("exit code {}", 3);
//!
//! // Switch the active levels at runtime
//! reconfigure(LevelMask::DEBUG | LevelMask::WARN).unwrap();
//! ```

pub mod appenders;
pub mod core;
pub mod global;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{Appender, ConsoleAppender, ConsoleTarget, RotatingFileAppender};
    pub use crate::core::{
        Encoder, LevelBand, LevelMask, LogEntry, LogLevel, Logger, LoggerError, Result,
        RotationPolicy, RouterConfig, TimestampFormat,
    };
    pub use crate::global::{flush, init, mask, reconfigure};
}

pub use appenders::{Appender, ConsoleAppender, ConsoleTarget, RotatingFileAppender};
pub use core::{
    Encoder, LevelBand, LevelMask, LogEntry, LogLevel, Logger, LoggerError, Result,
    RotationPolicy, RouterConfig, TimestampFormat,
};
pub use global::{flush, init, mask, reconfigure};
