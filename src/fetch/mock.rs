use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::StorySource;
use super::error::FetchError;
use crate::story::{Story, StoryId};

#[derive(Debug, Clone, Default)]
struct MockItem {
    title: Option<String>,
    text: Option<String>,
    delay: Option<Duration>,
}

/// In-memory [`StorySource`] for tests.
///
/// Ids listed with [`with_story`](Self::with_story) are returned in insertion
/// order by `top_story_ids`. Ids marked failing answer with
/// [`FetchError::ItemNotFound`].
#[derive(Debug, Default)]
pub struct MockStorySource {
    ranking: Vec<StoryId>,
    items: HashMap<StoryId, MockItem>,
    failing: HashSet<StoryId>,
    fail_listing: bool,
    item_requests: AtomicUsize,
}

impl MockStorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a ranked story with a title and optional body.
    pub fn with_story(mut self, id: StoryId, title: &str, text: Option<&str>) -> Self {
        self.ranking.push(id);
        self.items.insert(
            id,
            MockItem {
                title: Some(title.to_string()),
                text: text.map(str::to_string),
                delay: None,
            },
        );
        self
    }

    /// Adds a ranked story that has no title upstream.
    pub fn with_untitled_story(mut self, id: StoryId) -> Self {
        self.ranking.push(id);
        self.items.insert(id, MockItem::default());
        self
    }

    /// Adds `count` ranked stories titled `"Story {id}"`, ids starting at 1.
    pub fn with_numbered_stories(mut self, count: usize) -> Self {
        for id in 1..=count as StoryId {
            self = self.with_story(id, &format!("Story {}", id), None);
        }
        self
    }

    /// Delays the item response for `id`.
    pub fn with_delay(mut self, id: StoryId, delay: Duration) -> Self {
        self.items.entry(id).or_default().delay = Some(delay);
        self
    }

    /// Makes the item request for `id` fail.
    pub fn with_failing_story(mut self, id: StoryId) -> Self {
        if !self.ranking.contains(&id) {
            self.ranking.push(id);
        }
        self.failing.insert(id);
        self
    }

    /// Makes the ranking request fail.
    pub fn with_failing_listing(mut self) -> Self {
        self.fail_listing = true;
        self
    }

    /// Number of item requests served so far.
    pub fn item_requests(&self) -> usize {
        self.item_requests.load(Ordering::SeqCst)
    }
}

impl StorySource for MockStorySource {
    async fn top_story_ids(&self) -> Result<Vec<StoryId>, FetchError> {
        if self.fail_listing {
            return Err(FetchError::TaskFailed {
                reason: "mock listing failure".to_string(),
            });
        }
        Ok(self.ranking.clone())
    }

    async fn story(&self, id: StoryId) -> Result<Story, FetchError> {
        self.item_requests.fetch_add(1, Ordering::SeqCst);

        let item = self.items.get(&id).cloned().unwrap_or_default();
        if let Some(delay) = item.delay {
            tokio::time::sleep(delay).await;
        }

        if self.failing.contains(&id) || !self.items.contains_key(&id) {
            return Err(FetchError::ItemNotFound { id });
        }

        Ok(Story::from_parts(id, item.title, item.text))
    }
}
