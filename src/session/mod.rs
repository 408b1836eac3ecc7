//! Fetch → cache → rerank pipeline as seen from an interactive front end.
//!
//! A [`ReaderSession`] owns the current story collection. Opening a session
//! loads the cache or, when there is none, fetches fresh stories. After that
//! the collection only changes on an explicit [`refresh`](ReaderSession::refresh).

pub mod error;


pub use error::SessionError;

use std::sync::Arc;

use tracing::info;

use crate::fetch::{StoryFetcher, StorySource};
use crate::ranking::{RelevanceModel, StoryRanker};
use crate::storage::StoryCache;
use crate::story::Story;

/// Where the current collection came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionOrigin {
    /// Loaded from an existing cache file.
    Cache,
    /// Fetched from the API (and written to the cache).
    Fetched,
}

/// Interactive reader state: current stories plus the fetcher and ranker.
#[derive(Debug)]
pub struct ReaderSession<S, M> {
    fetcher: StoryFetcher<S>,
    ranker: StoryRanker<M>,
    story_limit: usize,
    stories: Vec<Story>,
    origin: CollectionOrigin,
}

impl<S: StorySource, M: RelevanceModel> ReaderSession<S, M> {
    /// Loads cached stories, fetching the top `story_limit` when no cache exists.
    pub async fn open(
        fetcher: StoryFetcher<S>,
        ranker: StoryRanker<M>,
        story_limit: usize,
    ) -> Result<Self, SessionError> {
        let cache = Arc::clone(fetcher.cache());
        let cached = tokio::task::spawn_blocking(move || cache.load())
            .await
            .map_err(|e| SessionError::TaskFailed {
                reason: e.to_string(),
            })??;

        let (stories, origin) = match cached {
            Some(stories) => (stories, CollectionOrigin::Cache),
            None => {
                info!(limit = story_limit, "No cached stories, fetching");
                let stories = fetcher.fetch_top_stories(story_limit).await?;
                (stories, CollectionOrigin::Fetched)
            }
        };

        Ok(Self {
            fetcher,
            ranker,
            story_limit,
            stories,
            origin,
        })
    }

    /// Current collection in load/fetch order.
    pub fn stories(&self) -> &[Story] {
        &self.stories
    }

    pub fn origin(&self) -> CollectionOrigin {
        self.origin
    }

    pub fn cache(&self) -> &StoryCache {
        self.fetcher.cache()
    }

    pub fn ranker(&self) -> &StoryRanker<M> {
        &self.ranker
    }

    /// Ranks the current collection by `interests`.
    ///
    /// The stored collection keeps its load order, so repeated submissions
    /// rank from the same starting point.
    pub fn submit_interests(&self, interests: &str) -> Result<Vec<Story>, SessionError> {
        Ok(self.ranker.rerank(self.stories.clone(), interests)?)
    }

    /// Fetches fresh stories (replacing the cache), then ranks them by `interests`.
    pub async fn refresh(&mut self, interests: &str) -> Result<Vec<Story>, SessionError> {
        self.stories = self.fetcher.fetch_top_stories(self.story_limit).await?;
        self.origin = CollectionOrigin::Fetched;
        self.submit_interests(interests)
    }
}
