//! Error types for splitter-core

use std::path::PathBuf;

/// Result type for splitter-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while running an extraction
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A source document could not be read; the run aborts before extraction
    #[error("Failed to read {label} document at {path}: {source}")]
    SourceUnreadable {
        label: String,
        path: PathBuf,
        #[source]
        source: splitter_fs::Error,
    },

    /// Writing a generated handler file failed
    #[error("Failed to write {name} to {path}: {source}")]
    EmitFailed {
        name: String,
        path: PathBuf,
        #[source]
        source: splitter_fs::Error,
    },

    /// Two distinct block names resolved to the same output path
    #[error("Blocks {first} and {second} both map to {path}")]
    PathCollision {
        path: String,
        first: String,
        second: String,
    },

    /// A block name that would place its file outside the category directory
    #[error("Block name {name:?} ({document}, line {line}) cannot be used as a file name")]
    UnsafeBlockName {
        name: String,
        document: String,
        line: usize,
    },

    /// Configuration rejected by validation
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Unknown category name in configuration
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// Error from splitter-fs
    #[error(transparent)]
    Fs(#[from] splitter_fs::Error),

    /// Error from splitter-blocks
    #[error(transparent)]
    Blocks(#[from] splitter_blocks::Error),
}
