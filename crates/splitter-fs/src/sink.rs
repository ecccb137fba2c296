//! Output sinks: where generated handler files are materialized.
//!
//! [`OutputSink`] is the filesystem capability handed to the emitter. The
//! disk implementation goes through [`crate::io::write_atomic`]; the
//! in-memory implementation backs tests and dry runs that need to observe
//! what would have been written.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::io::{self, RobustnessConfig};
use crate::{Error, NormalizedPath, Result};

/// Filesystem capability used to materialize output files.
pub trait OutputSink: Send + Sync {
    /// Whether a file already exists at `path`.
    fn exists(&self, path: &NormalizedPath) -> bool;

    /// Create `dir` and all of its missing parents. Idempotent.
    fn create_dir_all(&self, dir: &NormalizedPath) -> Result<()>;

    /// Write `content` to `path` as a single all-or-nothing operation.
    fn write(&self, path: &NormalizedPath, content: &str) -> Result<()>;
}

/// Sink writing to the real filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiskSink {
    robustness: RobustnessConfig,
}

impl DiskSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_robustness(robustness: RobustnessConfig) -> Self {
        Self { robustness }
    }
}

impl OutputSink for DiskSink {
    fn exists(&self, path: &NormalizedPath) -> bool {
        path.exists()
    }

    fn create_dir_all(&self, dir: &NormalizedPath) -> Result<()> {
        let native = dir.to_native();
        fs::create_dir_all(&native).map_err(|e| Error::io(native, e))
    }

    fn write(&self, path: &NormalizedPath, content: &str) -> Result<()> {
        io::write_atomic(path, content.as_bytes(), self.robustness)
    }
}

/// Sink keeping files in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    files: Mutex<BTreeMap<NormalizedPath, String>>,
    dirs: Mutex<BTreeSet<NormalizedPath>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a file, as if an earlier run had produced it.
    pub fn insert(&self, path: impl Into<NormalizedPath>, content: impl Into<String>) {
        lock(&self.files).insert(path.into(), content.into());
    }

    /// Contents of the file at `path`, if one was written.
    pub fn read(&self, path: &NormalizedPath) -> Option<String> {
        lock(&self.files).get(path).cloned()
    }

    /// All written file paths, sorted.
    pub fn paths(&self) -> Vec<NormalizedPath> {
        lock(&self.files).keys().cloned().collect()
    }

    /// Whether `dir` was created through [`OutputSink::create_dir_all`].
    pub fn has_dir(&self, dir: &NormalizedPath) -> bool {
        lock(&self.dirs).contains(dir)
    }

    pub fn len(&self) -> usize {
        lock(&self.files).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl OutputSink for MemorySink {
    fn exists(&self, path: &NormalizedPath) -> bool {
        lock(&self.files).contains_key(path)
    }

    fn create_dir_all(&self, dir: &NormalizedPath) -> Result<()> {
        let mut dirs = lock(&self.dirs);
        let mut current = Some(dir.clone());
        while let Some(d) = current {
            current = d.parent();
            dirs.insert(d);
        }
        Ok(())
    }

    fn write(&self, path: &NormalizedPath, content: &str) -> Result<()> {
        lock(&self.files).insert(path.clone(), content.to_string());
        Ok(())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
