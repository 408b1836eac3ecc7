use thiserror::Error;

use crate::storage::CacheError;
use crate::story::StoryId;

#[derive(Debug, Error)]
/// Errors returned while fetching stories.
pub enum FetchError {
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Transport failure, timeout, or non-success status.
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Response body was not the expected JSON shape.
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// The item endpoint answered `null` (deleted or unknown id).
    #[error("item {id} not found")]
    ItemNotFound { id: StoryId },

    /// A blocking task panicked or was cancelled.
    #[error("fetch task failed: {reason}")]
    TaskFailed { reason: String },

    /// Writing the fetched collection to the cache failed.
    #[error("cache error: {0}")]
    Cache(#[from] CacheError),
}
