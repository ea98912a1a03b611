//! Log level, level set and severity band definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
pub enum LogLevel {
    Debug = 0,
    #[default]
    Info = 1,
    Warn = 2,
    Error = 3,
}

impl LogLevel {
    pub const ALL: [LogLevel; 4] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }

    /// Fixed log file name for this level's rotating file sink
    pub fn file_name(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug.log",
            LogLevel::Info => "info.log",
            LogLevel::Warn => "warn.log",
            LogLevel::Error => "error.log",
        }
    }

    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            LogLevel::Debug => Blue,
            LogLevel::Info => Green,
            LogLevel::Warn => Yellow,
            LogLevel::Error => Red,
        }
    }

    fn mask_bit(&self) -> u8 {
        match self {
            LogLevel::Debug => 1,
            LogLevel::Info => 2,
            LogLevel::Warn => 4,
            LogLevel::Error => 8,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARN" | "WARNING" => Ok(LogLevel::Warn),
            "ERROR" => Ok(LogLevel::Error),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}

/// Set of enabled log levels
///
/// Each level occupies one bit (DEBUG=1, INFO=2, WARN=4, ERROR=8) and levels are
/// combined with `|`. The mask decides which per-level write paths exist; a level
/// outside the mask is never formatted or written.
///
/// # Examples
///
/// ```
/// use sievelog::{LevelMask, LogLevel};
///
/// let mask = LevelMask::DEBUG | LevelMask::WARN;
/// assert!(mask.contains(LogLevel::Debug));
/// assert!(!mask.contains(LogLevel::Error));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct LevelMask(u8);

impl<'de> Deserialize<'de> for LevelMask {
    /// Deserialize from the raw byte, discarding bits that do not name a level
    /// so a stored mask always equals its in-memory twin
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bits = u8::deserialize(deserializer)?;
        Ok(LevelMask::from_bits(bits))
    }
}

impl LevelMask {
    pub const EMPTY: LevelMask = LevelMask(0);
    pub const DEBUG: LevelMask = LevelMask(1);
    pub const INFO: LevelMask = LevelMask(2);
    pub const WARN: LevelMask = LevelMask(4);
    pub const ERROR: LevelMask = LevelMask(8);
    pub const ALL: LevelMask = LevelMask(0b1111);

    /// Build a mask from raw bits, discarding any bits that do not name a level
    #[must_use]
    pub fn from_bits(bits: u8) -> Self {
        LevelMask(bits & Self::ALL.0)
    }

    #[must_use]
    pub fn bits(&self) -> u8 {
        self.0
    }

    #[must_use]
    pub fn single(level: LogLevel) -> Self {
        LevelMask(level.mask_bit())
    }

    #[must_use]
    pub fn contains(&self, level: LogLevel) -> bool {
        self.0 & level.mask_bit() != 0
    }

    pub fn insert(&mut self, level: LogLevel) {
        self.0 |= level.mask_bit();
    }

    pub fn remove(&mut self, level: LogLevel) {
        self.0 &= !level.mask_bit();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Enabled levels in ascending severity order
    pub fn iter(&self) -> impl Iterator<Item = LogLevel> + '_ {
        LogLevel::ALL.into_iter().filter(|l| self.contains(*l))
    }
}

impl Default for LevelMask {
    /// Default startup mask: INFO | ERROR
    fn default() -> Self {
        LevelMask::INFO | LevelMask::ERROR
    }
}

impl BitOr for LevelMask {
    type Output = LevelMask;

    fn bitor(self, rhs: LevelMask) -> LevelMask {
        LevelMask(self.0 | rhs.0)
    }
}

impl BitOrAssign for LevelMask {
    fn bitor_assign(&mut self, rhs: LevelMask) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for LevelMask {
    type Output = LevelMask;

    fn bitand(self, rhs: LevelMask) -> LevelMask {
        LevelMask(self.0 & rhs.0)
    }
}

impl From<LogLevel> for LevelMask {
    fn from(level: LogLevel) -> Self {
        LevelMask::single(level)
    }
}

impl fmt::Display for LevelMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for level in self.iter() {
            if !first {
                write!(f, "|")?;
            }
            write!(f, "{}", level)?;
            first = false;
        }
        if first {
            write!(f, "EMPTY")?;
        }
        Ok(())
    }
}

/// Half-open severity range `[low, high)` captured by one write path
///
/// Bands are contiguous and disjoint: each band captures exactly its own named
/// level, never the levels above it. Enabling ERROR does not imply WARN.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelBand {
    pub low: LogLevel,
    pub high: Option<LogLevel>,
}

/// Ordered band table: level -> `[low, high)` bounds. The topmost band has no
/// upper bound.
const BAND_TABLE: [(LogLevel, LevelBand); 4] = [
    (
        LogLevel::Debug,
        LevelBand {
            low: LogLevel::Debug,
            high: Some(LogLevel::Info),
        },
    ),
    (
        LogLevel::Info,
        LevelBand {
            low: LogLevel::Info,
            high: Some(LogLevel::Warn),
        },
    ),
    (
        LogLevel::Warn,
        LevelBand {
            low: LogLevel::Warn,
            high: Some(LogLevel::Error),
        },
    ),
    (
        LogLevel::Error,
        LevelBand {
            low: LogLevel::Error,
            high: None,
        },
    ),
];

impl LevelBand {
    /// Look up the band for a level in the ordered table
    #[must_use]
    pub fn for_level(level: LogLevel) -> LevelBand {
        BAND_TABLE
            .iter()
            .find(|(l, _)| *l == level)
            .map(|(_, band)| *band)
            .unwrap_or(LevelBand {
                low: level,
                high: None,
            })
    }

    #[must_use]
    pub fn contains(&self, level: LogLevel) -> bool {
        level >= self.low && self.high.map_or(true, |high| level < high)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Error);
    }

    #[test]
    fn test_level_display() {
        assert_eq!(LogLevel::Debug.to_str(), "DEBUG");
        assert_eq!(LogLevel::Error.to_string(), "ERROR");
    }

    #[test]
    fn test_level_parse() {
        assert_eq!("debug".parse::<LogLevel>(), Ok(LogLevel::Debug));
        assert_eq!("WARNING".parse::<LogLevel>(), Ok(LogLevel::Warn));
        assert_eq!("Error".parse::<LogLevel>(), Ok(LogLevel::Error));
        assert!("fatal".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_level_file_names() {
        assert_eq!(LogLevel::Debug.file_name(), "debug.log");
        assert_eq!(LogLevel::Info.file_name(), "info.log");
        assert_eq!(LogLevel::Warn.file_name(), "warn.log");
        assert_eq!(LogLevel::Error.file_name(), "error.log");
    }

    #[test]
    fn test_mask_bits() {
        assert_eq!(LevelMask::DEBUG.bits(), 1);
        assert_eq!(LevelMask::INFO.bits(), 2);
        assert_eq!(LevelMask::WARN.bits(), 4);
        assert_eq!(LevelMask::ERROR.bits(), 8);
        assert_eq!((LevelMask::INFO | LevelMask::ERROR).bits(), 10);
    }

    #[test]
    fn test_default_mask() {
        let mask = LevelMask::default();
        assert_eq!(mask, LevelMask::INFO | LevelMask::ERROR);
        assert!(mask.contains(LogLevel::Info));
        assert!(mask.contains(LogLevel::Error));
        assert!(!mask.contains(LogLevel::Debug));
        assert!(!mask.contains(LogLevel::Warn));
    }

    #[test]
    fn test_mask_insert_remove() {
        let mut mask = LevelMask::EMPTY;
        assert!(mask.is_empty());

        mask.insert(LogLevel::Warn);
        assert!(mask.contains(LogLevel::Warn));

        mask.remove(LogLevel::Warn);
        assert!(mask.is_empty());
    }

    #[test]
    fn test_mask_from_bits_discards_unknown() {
        let mask = LevelMask::from_bits(0xFF);
        assert_eq!(mask, LevelMask::ALL);
        assert_eq!(mask.bits(), 0b1111);
    }

    #[test]
    fn test_mask_deserialize_discards_unknown_bits() {
        let mask: LevelMask = serde_json::from_str("255").expect("deserialize");
        assert_eq!(mask, LevelMask::ALL);
        assert_eq!(mask.bits(), 0b1111);

        let mask: LevelMask = serde_json::from_str("10").expect("deserialize");
        assert_eq!(mask, LevelMask::INFO | LevelMask::ERROR);
    }

    #[test]
    fn test_mask_serde_round_trip() {
        let mask = LevelMask::DEBUG | LevelMask::WARN;
        let json = serde_json::to_string(&mask).expect("serialize");
        assert_eq!(json, "5");
        let back: LevelMask = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, mask);
    }

    #[test]
    fn test_mask_iter_ascending() {
        let mask = LevelMask::ERROR | LevelMask::DEBUG;
        let levels: Vec<LogLevel> = mask.iter().collect();
        assert_eq!(levels, vec![LogLevel::Debug, LogLevel::Error]);
    }

    #[test]
    fn test_mask_display() {
        assert_eq!(LevelMask::EMPTY.to_string(), "EMPTY");
        assert_eq!(
            (LevelMask::INFO | LevelMask::ERROR).to_string(),
            "INFO|ERROR"
        );
    }

    #[test]
    fn test_band_bounds() {
        let band = LevelBand::for_level(LogLevel::Info);
        assert_eq!(band.low, LogLevel::Info);
        assert_eq!(band.high, Some(LogLevel::Warn));

        let band = LevelBand::for_level(LogLevel::Error);
        assert_eq!(band.low, LogLevel::Error);
        assert_eq!(band.high, None);
    }

    #[test]
    fn test_bands_capture_exactly_one_level() {
        for level in LogLevel::ALL {
            let band = LevelBand::for_level(level);
            for candidate in LogLevel::ALL {
                assert_eq!(
                    band.contains(candidate),
                    candidate == level,
                    "band for {} must capture {} iff equal",
                    level,
                    candidate
                );
            }
        }
    }

    #[test]
    fn test_error_band_not_cumulative() {
        let band = LevelBand::for_level(LogLevel::Error);
        assert!(!band.contains(LogLevel::Warn));
        assert!(band.contains(LogLevel::Error));
    }
}
