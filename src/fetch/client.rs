use std::time::Duration;

use reqwest::Client as HttpClient;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::StorySource;
use super::error::FetchError;
use crate::config::Config;
use crate::story::{Story, StoryId};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Fields read from an `item/{id}.json` record. Everything else is ignored.
#[derive(Debug, Deserialize)]
struct ItemRecord {
    title: Option<String>,
    text: Option<String>,
}

#[derive(Debug, Clone)]
/// Hacker News Firebase API client.
pub struct HnClient {
    http: HttpClient,
    base_url: String,
}

impl HnClient {
    /// Creates a client for the API rooted at `base_url` (e.g. `.../v0`).
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let http = HttpClient::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(FetchError::Client)?;

        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self { http, base_url })
    }

    /// Creates a client from the API settings in `config`.
    pub fn from_config(config: &Config) -> Result<Self, FetchError> {
        Self::new(config.api_base_url.clone(), config.request_timeout)
    }

    /// Returns the configured API root.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn top_stories_url(&self) -> String {
        format!("{}/topstories.json", self.base_url)
    }

    pub(crate) fn item_url(&self, id: StoryId) -> String {
        format!("{}/item/{}.json", self.base_url, id)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T, FetchError> {
        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|source| FetchError::Request {
                url: url.clone(),
                source,
            })?;

        let body = resp.bytes().await.map_err(|source| FetchError::Request {
            url: url.clone(),
            source,
        })?;

        serde_json::from_slice(&body).map_err(|source| FetchError::Decode { url, source })
    }
}

impl StorySource for HnClient {
    async fn top_story_ids(&self) -> Result<Vec<StoryId>, FetchError> {
        let ids: Vec<StoryId> = self.get_json(self.top_stories_url()).await?;
        debug!(count = ids.len(), "Fetched top story ids");
        Ok(ids)
    }

    async fn story(&self, id: StoryId) -> Result<Story, FetchError> {
        let record: Option<ItemRecord> = self.get_json(self.item_url(id)).await?;
        let record = record.ok_or(FetchError::ItemNotFound { id })?;
        Ok(Story::from_parts(id, record.title, record.text))
    }
}
