//! Cross-cutting, shared constants.
//!
//! Defaults here mirror the public Hacker News endpoints and the
//! sentence-transformers cross-encoder defaults. Runtime overrides go through
//! [`crate::config::Config`].

/// Firebase API root serving `topstories.json` and `item/{id}.json`.
pub const DEFAULT_API_BASE_URL: &str = "https://hacker-news.firebaseio.com/v0";

/// Host used to build story discussion links.
pub const DISCUSSION_BASE_URL: &str = "https://news.ycombinator.com";

/// Cache file written next to the working directory.
pub const DEFAULT_CACHE_FILENAME: &str = "hn_stories_cache.jsonl";

/// Number of top story ids kept from the ranking list.
pub const DEFAULT_STORY_LIMIT: usize = 500;

/// Upper bound on the default fetch pool size.
pub const MAX_DEFAULT_FETCH_CONCURRENCY: usize = 32;

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Title used when the upstream item has none.
pub const PLACEHOLDER_TITLE: &str = "No Title";

/// Pairs scored per forward pass.
pub const DEFAULT_RERANK_BATCH_SIZE: usize = 32;

pub const DEFAULT_MAX_SEQ_LEN: usize = 512;

/// Default fetch pool size: `min(32, cpus + 4)`.
///
/// Matches the sizing of a typical I/O-bound thread pool so a fetch of a few
/// hundred items finishes in a handful of round trips.
pub fn default_fetch_concurrency() -> usize {
    let cpus = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    (cpus + 4).min(MAX_DEFAULT_FETCH_CONCURRENCY)
}
