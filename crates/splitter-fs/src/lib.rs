//! Filesystem abstraction for handler-splitter
//!
//! Provides normalized paths, write-once atomic I/O, the [`OutputSink`]
//! capability used to materialize extracted handlers, and format-agnostic
//! configuration loading.

pub mod config;
pub mod error;
pub mod io;
pub mod path;
pub mod sink;

pub use config::ConfigStore;
pub use error::{Error, Result};
pub use io::RobustnessConfig;
pub use path::NormalizedPath;
pub use sink::{DiskSink, MemorySink, OutputSink};
