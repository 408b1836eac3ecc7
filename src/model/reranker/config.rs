use std::path::PathBuf;

use crate::config::Config;
use crate::constants::{DEFAULT_MAX_SEQ_LEN, DEFAULT_RERANK_BATCH_SIZE};

pub const MAX_SEQ_LEN: usize = DEFAULT_MAX_SEQ_LEN;

pub const DEFAULT_BATCH_SIZE: usize = DEFAULT_RERANK_BATCH_SIZE;

#[derive(Debug, Clone)]
pub struct RerankerConfig {
    /// Model directory with `config.json`, `model.safetensors`, `tokenizer.json`.
    /// `None` selects the lexical stub scorer.
    pub model_path: Option<PathBuf>,

    pub batch_size: usize,

    pub max_seq_len: usize,
}

impl Default for RerankerConfig {
    fn default() -> Self {
        Self {
            model_path: None,
            batch_size: DEFAULT_BATCH_SIZE,
            max_seq_len: MAX_SEQ_LEN,
        }
    }
}

impl RerankerConfig {
    pub fn new<P: Into<PathBuf>>(model_path: P) -> Self {
        Self {
            model_path: Some(model_path.into()),
            ..Default::default()
        }
    }

    pub fn stub() -> Self {
        Self::default()
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        assert!(batch_size > 0, "batch_size must be greater than zero");
        self.batch_size = batch_size;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.batch_size == 0 {
            return Err("batch_size must be greater than zero".to_string());
        }

        if self.max_seq_len == 0 {
            return Err("max_seq_len must be greater than zero".to_string());
        }

        if let Some(ref path) = self.model_path
            && path.as_os_str().is_empty()
        {
            return Err("model_path cannot be empty when provided".to_string());
        }

        Ok(())
    }

    /// Reranker settings from the application config.
    pub fn from_config(config: &Config) -> Self {
        Self {
            model_path: config.reranker_path.clone(),
            batch_size: config.rerank_batch_size,
            max_seq_len: MAX_SEQ_LEN,
        }
    }
}
