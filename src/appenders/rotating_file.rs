//! Rotating file appender
//!
//! Writes encoded entries to a single log file and rotates it by size, keeping
//! a bounded cascade of numbered backups (`name.1` is the most recent). Backups
//! beyond the configured count or age are deleted; rotated files can optionally
//! be gzipped.

use crate::appenders::Appender;
use crate::core::config::RotationPolicy;
use crate::core::encoder::Encoder;
use crate::core::entry::LogEntry;
use crate::core::error::{LoggerError, Result};
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime};

pub struct RotatingFileAppender {
    base_path: PathBuf,
    policy: RotationPolicy,
    encoder: Arc<Encoder>,
    writer: Option<BufWriter<File>>,
    current_size: u64,
}

impl RotatingFileAppender {
    /// Create a rotating appender for `path`, creating parent directories as
    /// needed
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be created or opened.
    pub fn new<P: AsRef<Path>>(
        path: P,
        policy: RotationPolicy,
        encoder: Arc<Encoder>,
    ) -> Result<Self> {
        let base_path = path.as_ref().to_path_buf();

        if let Some(parent) = base_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                LoggerError::io_operation(
                    "create log directory",
                    format!("Failed to create directory '{}'", parent.display()),
                    e,
                )
            })?;
        }

        let (file, current_size) = Self::open_append(&base_path)?;

        let mut appender = Self {
            base_path,
            policy,
            encoder,
            writer: Some(BufWriter::new(file)),
            current_size,
        };

        // Stale backups from a previous run are pruned up front
        appender.prune_expired_backups();

        Ok(appender)
    }

    fn open_append(path: &Path) -> Result<(File, u64)> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| {
                LoggerError::file_appender(
                    path.display().to_string(),
                    format!("Failed to open: {}", e),
                )
            })?;

        let size = file
            .metadata()
            .map_err(|e| {
                LoggerError::file_appender(
                    path.display().to_string(),
                    format!("Cannot access file metadata: {}", e),
                )
            })?
            .len();

        Ok((file, size))
    }

    /// Backup file path for a given index (`name.1`, `name.2`, ...)
    fn backup_path(&self, index: usize) -> PathBuf {
        let mut path = self.base_path.clone();
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("app.log");
        path.set_file_name(format!("{}.{}", filename, index));
        path
    }

    fn should_rotate(&self) -> bool {
        self.policy.max_bytes > 0 && self.current_size >= self.policy.max_bytes
    }

    /// Perform log rotation: cascade backups up by one index and start a fresh
    /// active file
    fn rotate(&mut self) -> Result<()> {
        // Release the current file handle before renaming it
        if let Some(mut writer) = self.writer.take() {
            writer.flush().map_err(|e| {
                LoggerError::file_rotation(
                    self.base_path.display().to_string(),
                    format!("Failed to flush before rotation: {}", e),
                )
            })?;
        }

        // The backup that would fall off the end of the cascade is removed first
        let oldest = self.backup_path(self.policy.max_backups);
        let oldest_gz = gz_path(&oldest);
        for stale in [&oldest_gz, &oldest] {
            if stale.exists() {
                if let Err(e) = fs::remove_file(stale) {
                    eprintln!(
                        "[WARN] Failed to remove oldest backup {}: {}",
                        stale.display(),
                        e
                    );
                }
            }
        }

        // Shift name.i -> name.(i+1), newest last so nothing is overwritten
        for i in (1..self.policy.max_backups).rev() {
            let old_path = self.backup_path(i);
            let new_path = self.backup_path(i + 1);
            let old_gz = gz_path(&old_path);
            let new_gz = gz_path(&new_path);

            if old_gz.exists() {
                rename_replacing(&old_gz, &new_gz)?;
            } else if old_path.exists() {
                rename_replacing(&old_path, &new_path)?;
            }
        }

        // Current file becomes backup .1
        if self.base_path.exists() {
            let backup = self.backup_path(1);
            fs::rename(&self.base_path, &backup).map_err(|e| {
                LoggerError::file_rotation(
                    self.base_path.display().to_string(),
                    format!("Failed to rotate current log file: {}", e),
                )
            })?;

            if self.policy.compress {
                self.compress_file(&backup)?;
            }
        }

        let (file, _) = Self::open_append(&self.base_path)?;
        self.writer = Some(BufWriter::new(file));
        self.current_size = 0;

        self.prune_expired_backups();

        Ok(())
    }

    /// Delete backups whose modification time exceeds the configured max age
    ///
    /// Best effort: failures are reported to stderr and never abort a write.
    fn prune_expired_backups(&self) {
        let Some(days) = self.policy.max_age_days else {
            return;
        };
        let max_age = Duration::from_secs(u64::from(days) * 24 * 60 * 60);
        let now = SystemTime::now();

        for i in 1..=self.policy.max_backups {
            let backup = self.backup_path(i);
            for candidate in [gz_path(&backup), backup] {
                let Ok(metadata) = fs::metadata(&candidate) else {
                    continue;
                };
                let expired = metadata
                    .modified()
                    .ok()
                    .and_then(|modified| now.duration_since(modified).ok())
                    .is_some_and(|age| age > max_age);
                if expired {
                    if let Err(e) = fs::remove_file(&candidate) {
                        eprintln!(
                            "[WARN] Failed to prune expired backup {}: {}",
                            candidate.display(),
                            e
                        );
                    }
                }
            }
        }
    }

    /// Gzip a rotated file, deleting the original only after the compressed
    /// copy is fully written
    fn compress_file(&self, path: &Path) -> Result<()> {
        use std::io::{BufReader, Read};

        let target = gz_path(path);
        let temp = {
            let mut name = target.clone().into_os_string();
            name.push(".tmp");
            PathBuf::from(name)
        };

        let input = File::open(path).map_err(|e| {
            LoggerError::io_operation(
                "compress rotated log",
                format!("Failed to open '{}'", path.display()),
                e,
            )
        })?;
        let mut reader = BufReader::with_capacity(64 * 1024, input);

        let output = File::create(&temp).map_err(|e| {
            LoggerError::io_operation(
                "compress rotated log",
                format!("Failed to create '{}'", temp.display()),
                e,
            )
        })?;
        let mut encoder =
            flate2::write::GzEncoder::new(BufWriter::new(output), flate2::Compression::default());

        let mut buffer = vec![0u8; 64 * 1024];
        loop {
            let n = reader.read(&mut buffer).map_err(|e| {
                let _ = fs::remove_file(&temp);
                LoggerError::io_operation(
                    "compress rotated log",
                    format!("Failed to read '{}'", path.display()),
                    e,
                )
            })?;
            if n == 0 {
                break;
            }
            encoder.write_all(&buffer[..n]).map_err(|e| {
                let _ = fs::remove_file(&temp);
                LoggerError::io_operation(
                    "compress rotated log",
                    "Failed to compress data chunk".to_string(),
                    e,
                )
            })?;
        }

        encoder.finish().map_err(|e| {
            let _ = fs::remove_file(&temp);
            LoggerError::io_operation(
                "compress rotated log",
                "Failed to finish compression".to_string(),
                e,
            )
        })?;

        fs::rename(&temp, &target).map_err(|e| {
            let _ = fs::remove_file(&temp);
            LoggerError::io_operation(
                "compress rotated log",
                format!("Failed to rename to '{}'", target.display()),
                e,
            )
        })?;

        if let Err(e) = fs::remove_file(path) {
            eprintln!(
                "[WARN] Compression succeeded but failed to remove original {}: {}",
                path.display(),
                e
            );
        }

        Ok(())
    }

    #[must_use]
    pub fn current_size(&self) -> u64 {
        self.current_size
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.base_path
    }

    #[must_use]
    pub fn policy(&self) -> &RotationPolicy {
        &self.policy
    }
}

fn gz_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("app.log")
        .to_string();
    name.push_str(".gz");
    path.with_file_name(name)
}

/// Rename, replacing the destination if a plain rename fails because it exists
fn rename_replacing(from: &Path, to: &Path) -> Result<()> {
    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(_) => {
            if to.exists() {
                let _ = fs::remove_file(to);
            }
            fs::rename(from, to).map_err(|e| {
                LoggerError::file_rotation(
                    from.display().to_string(),
                    format!("Failed to rotate backup files: {}", e),
                )
            })
        }
    }
}

impl Appender for RotatingFileAppender {
    fn name(&self) -> &str {
        "rotating_file"
    }

    fn append(&mut self, entry: &LogEntry) -> Result<()> {
        if self.should_rotate() {
            if let Err(e) = self.rotate() {
                // Keep logging to the current file rather than losing the entry
                eprintln!("[WARN] Log rotation failed: {}. Continuing with current file.", e);

                if self.writer.is_none() {
                    match Self::open_append(&self.base_path) {
                        Ok((file, size)) => {
                            self.writer = Some(BufWriter::new(file));
                            self.current_size = size;
                        }
                        Err(reopen_err) => {
                            eprintln!(
                                "[ERROR] Failed to reopen log file after rotation failure: {}",
                                reopen_err
                            );
                            return Err(e);
                        }
                    }
                }

                // Reset size tracking to avoid retrying rotation on every write
                self.current_size = 0;
            }
        }

        let mut line = self.encoder.encode(entry);
        line.push('\n');

        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| LoggerError::writer("File writer not initialized"))?;
        writer.write_all(line.as_bytes()).map_err(|e| {
            LoggerError::file_appender(
                self.base_path.display().to_string(),
                format!("Failed to write log entry: {}", e),
            )
        })?;
        self.current_size += line.len() as u64;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush().map_err(|e| {
                LoggerError::file_appender(
                    self.base_path.display().to_string(),
                    format!("Failed to flush: {}", e),
                )
            })?;
        }
        Ok(())
    }
}

impl Drop for RotatingFileAppender {
    fn drop(&mut self) {
        if let Some(mut writer) = self.writer.take() {
            let _ = writer.flush();
        }
    }
}
