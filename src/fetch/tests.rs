use super::*;
use std::time::Duration;
use tempfile::TempDir;

fn create_test_cache() -> (Arc<StoryCache>, TempDir) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let cache = Arc::new(StoryCache::new(dir.path().join("hn_stories_cache.jsonl")));
    (cache, dir)
}

fn titles(stories: &[Story]) -> Vec<&str> {
    stories.iter().map(|s| s.title.as_str()).collect()
}

#[tokio::test]
async fn test_list_top_story_ids_truncates() {
    let (cache, _dir) = create_test_cache();
    let fetcher = StoryFetcher::new(MockStorySource::new().with_numbered_stories(10), cache);

    let ids = fetcher.list_top_story_ids(4).await.unwrap();

    assert_eq!(ids, vec![1, 2, 3, 4]);
}

#[tokio::test]
async fn test_list_top_story_ids_fewer_than_limit() {
    let (cache, _dir) = create_test_cache();
    let fetcher = StoryFetcher::new(MockStorySource::new().with_numbered_stories(3), cache);

    let ids = fetcher.list_top_story_ids(500).await.unwrap();

    assert_eq!(ids.len(), 3);
}

#[tokio::test]
async fn test_list_failure_propagates() {
    let (cache, _dir) = create_test_cache();
    let fetcher = StoryFetcher::new(MockStorySource::new().with_failing_listing(), cache);

    assert!(fetcher.list_top_story_ids(10).await.is_err());
    assert!(fetcher.fetch_top_stories(10).await.is_err());
}

#[tokio::test]
async fn test_fetch_story_derives_fields() {
    let (cache, _dir) = create_test_cache();
    let source = MockStorySource::new()
        .with_story(7, "Launch HN: Widgets", Some("We make widgets"))
        .with_untitled_story(8);
    let fetcher = StoryFetcher::new(source, cache);

    let story = fetcher.fetch_story(7).await.unwrap();
    assert_eq!(story.url, "https://news.ycombinator.com/item?id=7");
    assert_eq!(story.combined_text, "Launch HN: Widgets\nWe make widgets");

    let untitled = fetcher.fetch_story(8).await.unwrap();
    assert_eq!(untitled.title, "No Title");
    assert_eq!(untitled.text, "");
    assert_eq!(untitled.combined_text, "No Title");
}

#[tokio::test]
async fn test_fetch_top_stories_writes_cache() {
    let (cache, _dir) = create_test_cache();
    assert!(cache.load().unwrap().is_none());

    let fetcher = StoryFetcher::new(
        MockStorySource::new().with_numbered_stories(10),
        Arc::clone(&cache),
    );

    let stories = fetcher.fetch_top_stories(3).await.unwrap();
    assert_eq!(stories.len(), 3);

    let content = std::fs::read_to_string(cache.path()).unwrap();
    assert_eq!(content.lines().count(), 3);
    assert_eq!(cache.load().unwrap().unwrap(), stories);
}

#[tokio::test]
async fn test_fetch_top_stories_contains_every_ranked_story() {
    let (cache, _dir) = create_test_cache();
    let fetcher =
        StoryFetcher::new(MockStorySource::new().with_numbered_stories(25), cache)
            .with_concurrency(4);

    let stories = fetcher.fetch_top_stories(25).await.unwrap();

    let mut got: Vec<String> = stories.iter().map(|s| s.title.clone()).collect();
    got.sort();
    let mut expected: Vec<String> = (1..=25).map(|i| format!("Story {}", i)).collect();
    expected.sort();
    assert_eq!(got, expected);
    assert_eq!(fetcher.source().item_requests(), 25);
}

#[tokio::test]
async fn test_fetch_top_stories_completion_order() {
    let (cache, _dir) = create_test_cache();
    let source = MockStorySource::new()
        .with_story(1, "slow", None)
        .with_story(2, "fast", None)
        .with_delay(1, Duration::from_millis(100));
    let fetcher = StoryFetcher::new(source, cache).with_concurrency(2);

    let stories = fetcher.fetch_top_stories(2).await.unwrap();

    assert_eq!(titles(&stories), vec!["fast", "slow"]);
}

#[tokio::test]
async fn test_single_failure_aborts_batch() {
    let (cache, _dir) = create_test_cache();
    let source = MockStorySource::new()
        .with_numbered_stories(5)
        .with_failing_story(3);
    let fetcher = StoryFetcher::new(source, Arc::clone(&cache));

    let result = fetcher.fetch_top_stories(5).await;

    assert!(matches!(result, Err(FetchError::ItemNotFound { id: 3 })));
    assert!(!cache.exists());
}

#[tokio::test]
async fn test_failure_leaves_previous_cache_intact() {
    let (cache, _dir) = create_test_cache();
    let previous = vec![Story::from_parts(99, Some("Old".to_string()), None)];
    cache.save(&previous).unwrap();

    let source = MockStorySource::new()
        .with_numbered_stories(2)
        .with_failing_story(2);
    let fetcher = StoryFetcher::new(source, Arc::clone(&cache));

    assert!(fetcher.fetch_top_stories(2).await.is_err());
    assert_eq!(cache.load().unwrap().unwrap(), previous);
}

#[tokio::test]
async fn test_failing_story_beyond_limit_is_not_requested() {
    let (cache, _dir) = create_test_cache();
    let source = MockStorySource::new()
        .with_numbered_stories(3)
        .with_failing_story(4);
    let fetcher = StoryFetcher::new(source, cache);

    let stories = fetcher.fetch_top_stories(3).await.unwrap();

    assert_eq!(stories.len(), 3);
}

#[test]
fn test_concurrency_floor() {
    let (cache, _dir) = create_test_cache();
    let fetcher = StoryFetcher::new(MockStorySource::new(), cache).with_concurrency(0);

    assert_eq!(fetcher.concurrency(), 1);
}

#[test]
fn test_client_urls() {
    let client =
        HnClient::new("https://hacker-news.firebaseio.com/v0/", Duration::from_secs(5)).unwrap();

    assert_eq!(client.base_url(), "https://hacker-news.firebaseio.com/v0");
    assert_eq!(
        client.top_stories_url(),
        "https://hacker-news.firebaseio.com/v0/topstories.json"
    );
    assert_eq!(
        client.item_url(8863),
        "https://hacker-news.firebaseio.com/v0/item/8863.json"
    );
}
