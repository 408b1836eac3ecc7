//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Bad `HNR_*` environment settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A numeric variable could not be parsed.
    #[error("failed to parse {name}='{value}': {source}")]
    ParseInt {
        name: &'static str,
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// A count or duration that must be at least 1 was zero.
    #[error("{name} must be greater than zero, got '{value}'")]
    NotPositive { name: &'static str, value: String },

    /// API base URL is not an http(s) URL.
    #[error("invalid API base URL '{value}': expected http:// or https://")]
    InvalidBaseUrl { value: String },

    /// Reranker checkpoint directory is missing.
    #[error("reranker path does not exist: {path}")]
    PathNotFound { path: PathBuf },

    /// Cache path names a directory instead of a file.
    #[error("cache path is a directory, expected a file: {path}")]
    NotAFile { path: PathBuf },

    /// Reranker path names a file instead of a checkpoint directory.
    #[error("reranker path is not a directory: {path}")]
    NotADirectory { path: PathBuf },
}
