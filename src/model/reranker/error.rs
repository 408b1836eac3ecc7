use std::path::PathBuf;
use thiserror::Error;

/// Failures while loading or running the relevance model.
#[derive(Debug, Error)]
pub enum RerankerError {
    #[error("model directory {path} does not exist")]
    ModelNotFound { path: PathBuf },

    /// The directory exists but lacks one of the checkpoint files.
    #[error("model directory {dir} is missing {file}")]
    MissingModelFile { dir: PathBuf, file: &'static str },

    #[error("could not load relevance model from {dir}: {reason}")]
    ModelLoadFailed { dir: PathBuf, reason: String },

    #[error("relevance inference failed: {0}")]
    Inference(#[from] candle_core::Error),

    #[error("could not tokenize story pairs: {reason}")]
    TokenizationFailed { reason: String },

    #[error("bad reranker settings: {reason}")]
    InvalidConfig { reason: String },

    #[error("model returned {got} scores for {expected} pairs")]
    ScoreCountMismatch { expected: usize, got: usize },
}
