//! Interest-based story ranking.
//!
//! [`StoryRanker`] pairs the user's interest text with every story's
//! `combined_text`, scores the whole batch with a [`RelevanceModel`] and
//! returns the stories best first.
//!
//! # Ordering
//!
//! Sorting is stable: stories with equal scores keep their input order.
//! NaN scores sort after every real score. The query is passed to the model
//! as-is, including when it is empty.

pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;


pub use error::RankingError;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockRelevanceModel;

use tracing::debug;

use crate::model::{Reranker, RerankerConfig};
use crate::story::Story;

/// Pairwise relevance scorer.
pub trait RelevanceModel: Send + Sync {
    /// Returns one score per `(query, document)` pair, in input order.
    /// Higher means more relevant.
    fn predict(&self, pairs: &[(&str, &str)]) -> Result<Vec<f32>, RankingError>;
}

impl RelevanceModel for Reranker {
    fn predict(&self, pairs: &[(&str, &str)]) -> Result<Vec<f32>, RankingError> {
        Ok(Reranker::predict(self, pairs)?)
    }
}

/// A story with the relevance score it was ranked by.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedStory {
    pub story: Story,
    pub score: f32,
}

/// Ranks stories against interest text with a model loaded once.
#[derive(Debug)]
pub struct StoryRanker<M> {
    model: M,
}

impl StoryRanker<Reranker> {
    /// Loads the cross-encoder described by `config`.
    pub fn load(config: RerankerConfig) -> Result<Self, RankingError> {
        Ok(Self::new(Reranker::load(config)?))
    }

    /// Ranker backed by the lexical stub scorer.
    pub fn stub() -> Result<Self, RankingError> {
        Ok(Self::new(Reranker::stub()?))
    }
}

impl<M: RelevanceModel> StoryRanker<M> {
    pub fn new(model: M) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Returns `stories` sorted by descending relevance to `query`.
    pub fn rerank(&self, stories: Vec<Story>, query: &str) -> Result<Vec<Story>, RankingError> {
        Ok(self
            .rerank_with_scores(stories, query)?
            .into_iter()
            .map(|ranked| ranked.story)
            .collect())
    }

    /// Like [`rerank`](Self::rerank), keeping each story's score.
    pub fn rerank_with_scores(
        &self,
        stories: Vec<Story>,
        query: &str,
    ) -> Result<Vec<RankedStory>, RankingError> {
        debug!(
            query_len = query.len(),
            stories = stories.len(),
            "Reranking stories"
        );

        let scores = {
            let pairs: Vec<(&str, &str)> = stories
                .iter()
                .map(|story| (query, story.combined_text.as_str()))
                .collect();
            self.model.predict(&pairs)?
        };

        if scores.len() != stories.len() {
            return Err(RankingError::ScoreCountMismatch {
                expected: stories.len(),
                got: scores.len(),
            });
        }

        let mut ranked: Vec<RankedStory> = stories
            .into_iter()
            .zip(scores)
            .map(|(story, score)| RankedStory { story, score })
            .collect();

        ranked.sort_by(|a, b| sort_key(b.score).total_cmp(&sort_key(a.score)));

        debug!(
            top_score = ranked.first().map(|r| r.score),
            "Reranking complete"
        );

        Ok(ranked)
    }
}

fn sort_key(score: f32) -> f32 {
    if score.is_nan() {
        f32::NEG_INFINITY
    } else {
        score
    }
}
