//! Core logger types

pub mod config;
pub mod encoder;
pub mod entry;
pub mod error;
pub mod level;
pub mod logger;

pub use config::{RotationPolicy, RouterConfig};
pub use encoder::{Encoder, TimestampFormat};
pub use entry::LogEntry;
pub use error::{LoggerError, Result};
pub use level::{LevelBand, LevelMask, LogLevel};
pub use logger::Logger;
