//! Hacker News top-stories reranker library (used by the `hn-rerank` binary
//! and integration tests).
//!
//! # Pipeline
//!
//! - [`StoryFetcher`] lists the top story ids and fetches every item
//!   concurrently, writing the result to the [`StoryCache`].
//! - [`StoryCache`] persists the collection as line-delimited JSON and loads
//!   it on the next start.
//! - [`StoryRanker`] scores `(interests, story)` pairs with a cross-encoder
//!   [`Reranker`] and returns the stories best first.
//! - [`ReaderSession`] ties the three together for an interactive front end.
//!
//! ## Test/Mock Support
//! [`MockStorySource`] and [`MockRelevanceModel`] are available behind
//! `#[cfg(any(test, feature = "mock"))]`.

pub mod config;
pub mod constants;
pub mod fetch;
pub mod model;
pub mod ranking;
pub mod session;
pub mod storage;
pub mod story;

pub use config::{Config, ConfigError};
pub use constants::{
    DEFAULT_API_BASE_URL, DEFAULT_CACHE_FILENAME, DEFAULT_STORY_LIMIT, PLACEHOLDER_TITLE,
    default_fetch_concurrency,
};
#[cfg(any(test, feature = "mock"))]
pub use fetch::MockStorySource;
pub use fetch::{FetchError, HnClient, StoryFetcher, StorySource};
pub use model::{Reranker, RerankerConfig, RerankerError};
#[cfg(any(test, feature = "mock"))]
pub use ranking::MockRelevanceModel;
pub use ranking::{RankedStory, RankingError, RelevanceModel, StoryRanker};
pub use session::{CollectionOrigin, ReaderSession, SessionError};
pub use storage::{CacheError, CacheResult, StoryCache};
pub use story::{Story, StoryId, combine_text, discussion_url, render_listing};
