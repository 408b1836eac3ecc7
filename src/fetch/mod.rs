//! Top-story fetching.
//!
//! [`StoryFetcher`] lists the current top story ids, then fetches every item
//! concurrently through a [`StorySource`] and replaces the story cache with
//! the result.
//!
//! # Ordering
//!
//! The returned collection is in fetch *completion* order, not ranking order.
//! Callers must not rely on position before reranking.
//!
//! # Failure
//!
//! The batch is all-or-nothing: the first failed item fetch aborts the
//! remaining requests and nothing is written to the cache.

pub mod client;
pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;

#[cfg(test)]
mod tests;

pub use client::HnClient;
pub use error::FetchError;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockStorySource;

use std::sync::Arc;
use std::time::Instant;

use futures_util::{StreamExt, TryStreamExt, stream};
use tracing::{debug, info};

use crate::constants::default_fetch_concurrency;
use crate::storage::StoryCache;
use crate::story::{Story, StoryId};

/// Remote source of top story ids and story records.
pub trait StorySource: Send + Sync {
    /// Returns the full current ranking, best first.
    fn top_story_ids(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<StoryId>, FetchError>> + Send;

    /// Fetches a single story record.
    fn story(
        &self,
        id: StoryId,
    ) -> impl std::future::Future<Output = Result<Story, FetchError>> + Send;
}

/// Fetches top stories and writes them to the cache.
#[derive(Debug)]
pub struct StoryFetcher<S> {
    source: S,
    cache: Arc<StoryCache>,
    concurrency: usize,
}

impl<S: StorySource> StoryFetcher<S> {
    /// Creates a fetcher with the default pool size.
    pub fn new(source: S, cache: Arc<StoryCache>) -> Self {
        Self {
            source,
            cache,
            concurrency: default_fetch_concurrency(),
        }
    }

    /// Sets the number of item requests in flight (minimum 1).
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn cache(&self) -> &Arc<StoryCache> {
        &self.cache
    }

    /// Returns the first `limit` top story ids in ranking order.
    pub async fn list_top_story_ids(&self, limit: usize) -> Result<Vec<StoryId>, FetchError> {
        let mut ids = self.source.top_story_ids().await?;
        ids.truncate(limit);
        Ok(ids)
    }

    /// Fetches one story.
    pub async fn fetch_story(&self, id: StoryId) -> Result<Story, FetchError> {
        self.source.story(id).await
    }

    /// Fetches the top `limit` stories and replaces the cache with them.
    pub async fn fetch_top_stories(&self, limit: usize) -> Result<Vec<Story>, FetchError> {
        let started = Instant::now();
        let ids = self.list_top_story_ids(limit).await?;

        debug!(
            ids = ids.len(),
            concurrency = self.concurrency,
            "Fetching story details"
        );

        let stories: Vec<Story> = stream::iter(ids)
            .map(|id| self.source.story(id))
            .buffer_unordered(self.concurrency)
            .try_collect()
            .await?;

        let cache = Arc::clone(&self.cache);
        let stories = tokio::task::spawn_blocking(move || cache.save(&stories).map(|()| stories))
            .await
            .map_err(|e| FetchError::TaskFailed {
                reason: e.to_string(),
            })??;

        info!(
            stories = stories.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Fetched top stories"
        );

        Ok(stories)
    }
}
