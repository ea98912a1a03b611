//! Logging macros for the process-wide logger.
//!
//! These macros format a variadic argument list into a single message, as
//! `println!` does, and forward it to the installed logger. Call-site
//! attribution survives the macro: the logged `file:line` is the caller's,
//! not this crate's.
//!
//! # Examples
//!
//! ```no_run
//! use sievelog::{info, err};
//!
//! info!("server started");
//!
//! let port = 8080;
//! info!("listening on port {}", port);
//!
//! err!("connect failed: {} (attempt {})", "timeout", 3);
//! ```

/// Log a DEBUG message through the process-wide logger.
///
/// When DEBUG is enabled the entry lands in `debug.log` and on stdout.
#[macro_export]
macro_rules! debug {
    ($($arg:tt)+) => {
        $crate::global::debug(::core::format_args!($($arg)+))
    };
}

/// Log an INFO message through the process-wide logger.
#[macro_export]
macro_rules! info {
    ($($arg:tt)+) => {
        $crate::global::info(::core::format_args!($($arg)+))
    };
}

/// Log a WARN message through the process-wide logger.
#[macro_export]
macro_rules! warn {
    ($($arg:tt)+) => {
        $crate::global::warn(::core::format_args!($($arg)+))
    };
}

/// Log an ERROR message through the process-wide logger.
///
/// When ERROR is enabled the entry lands in `error.log` and on stderr.
#[macro_export]
macro_rules! err {
    ($($arg:tt)+) => {
        $crate::global::err(::core::format_args!($($arg)+))
    };
}

#[cfg(test)]
mod tests {
    use crate::core::config::RouterConfig;
    use crate::core::level::LevelMask;
    use tempfile::tempdir;

    // The process-wide logger is shared state, so all four macros run in one
    // test to keep the installed configuration stable.
    #[test]
    fn test_each_macro_emits_through_global() {
        let dir = tempdir().unwrap();
        crate::global::init(
            RouterConfig::new()
                .with_dir(dir.path())
                .with_mask(LevelMask::ALL),
        )
        .unwrap();

        debug!("macro debug {}", 1);
        info!("macro info {}", 2);
        warn!("macro warn {}", 3);
        err!("macro err {}", 4);

        for (name, expect) in [
            ("debug.log", "macro debug 1"),
            ("info.log", "macro info 2"),
            ("warn.log", "macro warn 3"),
            ("error.log", "macro err 4"),
        ] {
            let content = std::fs::read_to_string(dir.path().join(name)).unwrap();
            assert!(content.contains(expect), "{} missing entry", name);
            // Attribution stays at the macro call site
            assert!(content.contains("macros.rs:"), "{} missing call site", name);
        }
    }
}
