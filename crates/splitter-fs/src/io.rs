//! Atomic I/O operations with file locking

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::time::Duration;

use backoff::ExponentialBackoff;
use fs2::FileExt;

use crate::{Error, NormalizedPath, Result};

/// Tuning for [`write_atomic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RobustnessConfig {
    /// How long to keep retrying the advisory lock before giving up.
    pub lock_timeout: Duration,
    /// Whether to fsync the temp file before renaming it into place.
    pub enable_fsync: bool,
}

impl Default for RobustnessConfig {
    fn default() -> Self {
        Self {
            lock_timeout: Duration::from_secs(5),
            enable_fsync: true,
        }
    }
}

/// Write content atomically to a file with locking.
///
/// Uses write-to-temp-then-rename so readers never observe a partially
/// written file. The temp file is removed on every failure path.
pub fn write_atomic(path: &NormalizedPath, content: &[u8], config: RobustnessConfig) -> Result<()> {
    let native_path = path.to_native();

    if let Some(parent) = native_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    // Same directory keeps the rename on one filesystem
    let temp_name = format!(
        ".{}.{}.tmp",
        native_path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
        std::process::id()
    );
    let temp_path = native_path.with_file_name(&temp_name);

    let result = write_temp(&temp_path, &native_path, content, config)
        .and_then(|()| fs::rename(&temp_path, &native_path).map_err(|e| Error::io(&native_path, e)));

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}

fn write_temp(temp_path: &Path, target: &Path, content: &[u8], config: RobustnessConfig) -> Result<()> {
    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(temp_path)
        .map_err(|e| Error::io(temp_path, e))?;

    lock_with_retry(&temp_file, target, config.lock_timeout)?;

    temp_file
        .write_all(content)
        .map_err(|e| Error::io(temp_path, e))?;

    if config.enable_fsync {
        temp_file
            .sync_all()
            .map_err(|e| Error::io(temp_path, e))?;
    }

    FileExt::unlock(&temp_file).map_err(|_| Error::LockFailed {
        path: target.to_path_buf(),
    })
}

fn lock_with_retry(file: &File, target: &Path, timeout: Duration) -> Result<()> {
    let policy = ExponentialBackoff {
        initial_interval: Duration::from_millis(10),
        max_elapsed_time: Some(timeout),
        ..ExponentialBackoff::default()
    };

    backoff::retry(policy, || {
        file.try_lock_exclusive()
            .map_err(backoff::Error::transient)
    })
    .map_err(|_| {
        tracing::warn!(path = %target.display(), "gave up waiting for file lock");
        Error::LockFailed {
            path: target.to_path_buf(),
        }
    })
}

/// Read text content from a file.
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native_path = path.to_native();
    fs::read_to_string(&native_path).map_err(|e| Error::io(&native_path, e))
}

/// Write text content to a file atomically with default robustness settings.
pub fn write_text(path: &NormalizedPath, content: &str) -> Result<()> {
    write_atomic(path, content.as_bytes(), RobustnessConfig::default())
}
