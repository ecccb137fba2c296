//! Error types for splitter-blocks

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid {marker} pattern for prefix {prefix:?}: {source}")]
    InvalidPattern {
        marker: &'static str,
        prefix: String,
        #[source]
        source: regex::Error,
    },
}
