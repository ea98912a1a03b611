//! Logger configuration types

use super::encoder::TimestampFormat;
use super::level::LevelMask;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Rotation policy for one per-level log file
///
/// # Examples
///
/// ```
/// use sievelog::RotationPolicy;
///
/// let policy = RotationPolicy::new()
///     .with_max_bytes(50 * 1024 * 1024)
///     .with_max_backups(7)
///     .with_max_age_days(Some(30));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotationPolicy {
    /// Rotate once the active file reaches this size in bytes
    pub max_bytes: u64,
    /// Maximum number of rotated backups to keep
    pub max_backups: usize,
    /// Prune backups older than this many days, if set
    pub max_age_days: Option<u32>,
    /// Whether to gzip rotated backups
    pub compress: bool,
}

impl Default for RotationPolicy {
    /// 10 MB trigger, 5 backups, 10 days max age, no compression
    fn default() -> Self {
        Self {
            max_bytes: 10 * 1024 * 1024,
            max_backups: 5,
            max_age_days: Some(10),
            compress: false,
        }
    }
}

impl RotationPolicy {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_max_backups(mut self, count: usize) -> Self {
        self.max_backups = count;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_max_age_days(mut self, days: Option<u32>) -> Self {
        self.max_age_days = days;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_compression(mut self, enabled: bool) -> Self {
        self.compress = enabled;
        self
    }
}

/// Full logger configuration: logs directory, active level mask, rotation and
/// formatting policies
///
/// Unlike the process-wide convenience layer in [`crate::global`], a
/// `RouterConfig` is an explicit value: pass it to
/// [`Logger::from_config`](crate::Logger::from_config) to build an isolated
/// logger for testing or dependency injection.
///
/// # Examples
///
/// ```
/// use sievelog::{LevelMask, RouterConfig};
///
/// let config = RouterConfig::new()
///     .with_dir("/var/log/myapp")
///     .with_mask(LevelMask::DEBUG | LevelMask::ERROR);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Directory holding the per-level log files
    pub dir: PathBuf,
    /// Enabled severity levels
    pub mask: LevelMask,
    /// Rotation policy applied to every per-level file
    pub rotation: RotationPolicy,
    /// Timestamp format for encoded entries
    pub timestamp_format: TimestampFormat,
    /// Whether console mirrors use colored level names
    pub console_colors: bool,
}

impl Default for RouterConfig {
    /// `./logs` directory, INFO|ERROR mask, default rotation, plain console
    fn default() -> Self {
        Self {
            dir: PathBuf::from("./logs"),
            mask: LevelMask::default(),
            rotation: RotationPolicy::default(),
            timestamp_format: TimestampFormat::default(),
            console_colors: false,
        }
    }
}

impl RouterConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = dir.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_mask(mut self, mask: LevelMask) -> Self {
        self.mask = mask;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_rotation(mut self, rotation: RotationPolicy) -> Self {
        self.rotation = rotation;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_console_colors(mut self, enabled: bool) -> Self {
        self.console_colors = enabled;
        self
    }
}
