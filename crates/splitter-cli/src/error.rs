//! Error types for splitter-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from splitter-core
    #[error(transparent)]
    Core(#[from] splitter_core::Error),

    /// Error from splitter-fs
    #[error(transparent)]
    Fs(#[from] splitter_fs::Error),

    /// Logging could not be initialised
    #[error("Failed to initialise logging: {0}")]
    Logging(String),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}
