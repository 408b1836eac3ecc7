use thiserror::Error;

use crate::fetch::FetchError;
use crate::ranking::RankingError;
use crate::storage::CacheError;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("cache failed: {0}")]
    Cache(#[from] CacheError),

    #[error("ranking failed: {0}")]
    Ranking(#[from] RankingError),

    #[error("background task failed: {reason}")]
    TaskFailed { reason: String },
}
