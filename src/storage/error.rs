use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
/// Errors returned by the story cache.
pub enum CacheError {
    /// IO error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A story could not be serialized.
    #[error("failed to encode story: {0}")]
    Encode(#[source] serde_json::Error),

    /// A cache line is not a valid story record.
    #[error("malformed cache line {line} in {path}: {source}")]
    Decode {
        /// Cache file path.
        path: PathBuf,
        /// 1-based line number.
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;
