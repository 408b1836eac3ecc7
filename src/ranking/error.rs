use thiserror::Error;

use crate::model::RerankerError;

#[derive(Debug, Error)]
pub enum RankingError {
    #[error("reranker error: {0}")]
    Reranker(#[from] RerankerError),

    #[error("relevance model returned {got} scores for {expected} stories")]
    ScoreCountMismatch { expected: usize, got: usize },

    #[error("scoring computation failed: {reason}")]
    ComputationFailed { reason: String },
}
