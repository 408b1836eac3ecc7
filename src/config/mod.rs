//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `HNR_*` environment variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{
    DEFAULT_API_BASE_URL, DEFAULT_CACHE_FILENAME, DEFAULT_REQUEST_TIMEOUT_SECS,
    DEFAULT_RERANK_BATCH_SIZE, DEFAULT_STORY_LIMIT, default_fetch_concurrency,
};

/// Application configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `HNR_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root of the Hacker News API. Default: `https://hacker-news.firebaseio.com/v0`.
    pub api_base_url: String,

    /// Line-delimited JSON cache file. Default: `./hn_stories_cache.jsonl`.
    pub cache_path: PathBuf,

    /// How many top stories to fetch. Default: `500`.
    pub story_limit: usize,

    /// Concurrent item requests during a fetch. Default: `min(32, cpus + 4)`.
    pub fetch_concurrency: usize,

    /// Per-request HTTP timeout. Default: 30 seconds.
    pub request_timeout: Duration,

    /// Path to the cross-encoder model directory (BERT + tokenizer).
    pub reranker_path: Option<PathBuf>,

    /// Pairs per reranker forward pass. Default: `32`.
    pub rerank_batch_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            cache_path: PathBuf::from(DEFAULT_CACHE_FILENAME),
            story_limit: DEFAULT_STORY_LIMIT,
            fetch_concurrency: default_fetch_concurrency(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            reranker_path: None,
            rerank_batch_size: DEFAULT_RERANK_BATCH_SIZE,
        }
    }
}

impl Config {
    const ENV_API_BASE_URL: &'static str = "HNR_API_BASE_URL";
    const ENV_CACHE_PATH: &'static str = "HNR_CACHE_PATH";
    const ENV_STORY_LIMIT: &'static str = "HNR_STORY_LIMIT";
    const ENV_FETCH_CONCURRENCY: &'static str = "HNR_FETCH_CONCURRENCY";
    const ENV_REQUEST_TIMEOUT_SECS: &'static str = "HNR_REQUEST_TIMEOUT_SECS";
    const ENV_RERANKER_PATH: &'static str = "HNR_RERANKER_PATH";
    const ENV_RERANK_BATCH_SIZE: &'static str = "HNR_RERANK_BATCH_SIZE";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let api_base_url =
            Self::parse_string_from_env(Self::ENV_API_BASE_URL, defaults.api_base_url);
        let cache_path = Self::parse_path_from_env(Self::ENV_CACHE_PATH, defaults.cache_path);
        let story_limit =
            Self::parse_positive_from_env(Self::ENV_STORY_LIMIT, defaults.story_limit)?;
        let fetch_concurrency =
            Self::parse_positive_from_env(Self::ENV_FETCH_CONCURRENCY, defaults.fetch_concurrency)?;
        let request_timeout = Self::parse_positive_from_env(
            Self::ENV_REQUEST_TIMEOUT_SECS,
            defaults.request_timeout.as_secs() as usize,
        )
        .map(|secs| Duration::from_secs(secs as u64))?;
        let reranker_path = Self::parse_optional_path_from_env(Self::ENV_RERANKER_PATH);
        let rerank_batch_size = Self::parse_positive_from_env(
            Self::ENV_RERANK_BATCH_SIZE,
            defaults.rerank_batch_size,
        )?;

        Ok(Self {
            api_base_url,
            cache_path,
            story_limit,
            fetch_concurrency,
            request_timeout,
            reranker_path,
            rerank_batch_size,
        })
    }

    /// Validates values and paths (does not touch the network or create files).
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = self.api_base_url.trim();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl {
                value: self.api_base_url.clone(),
            });
        }

        if self.story_limit == 0 {
            return Err(ConfigError::NotPositive {
                name: Self::ENV_STORY_LIMIT,
                value: "0".to_string(),
            });
        }

        if self.fetch_concurrency == 0 {
            return Err(ConfigError::NotPositive {
                name: Self::ENV_FETCH_CONCURRENCY,
                value: "0".to_string(),
            });
        }

        if self.rerank_batch_size == 0 {
            return Err(ConfigError::NotPositive {
                name: Self::ENV_RERANK_BATCH_SIZE,
                value: "0".to_string(),
            });
        }

        if self.cache_path.is_dir() {
            return Err(ConfigError::NotAFile {
                path: self.cache_path.clone(),
            });
        }

        if let Some(ref path) = self.reranker_path {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_dir() {
                return Err(ConfigError::NotADirectory { path: path.clone() });
            }
        }

        Ok(())
    }

    fn parse_positive_from_env(
        var_name: &'static str,
        default: usize,
    ) -> Result<usize, ConfigError> {
        match env::var(var_name) {
            Ok(value) => {
                let parsed: usize = value.trim().parse().map_err(|e| ConfigError::ParseInt {
                    name: var_name,
                    value: value.clone(),
                    source: e,
                })?;

                if parsed == 0 {
                    return Err(ConfigError::NotPositive {
                        name: var_name,
                        value,
                    });
                }

                Ok(parsed)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_path_from_env(var_name: &str, default: PathBuf) -> PathBuf {
        env::var(var_name).map(PathBuf::from).unwrap_or(default)
    }

    fn parse_optional_path_from_env(var_name: &str) -> Option<PathBuf> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(default)
    }
}
