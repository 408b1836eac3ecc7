use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;

use super::{RankingError, RelevanceModel};

/// [`RelevanceModel`] with scores fixed per document text.
///
/// Documents without an explicit score get `default_score`. Every query seen
/// is recorded for assertions.
#[derive(Debug, Default)]
pub struct MockRelevanceModel {
    scores: HashMap<String, f32>,
    default_score: f32,
    fail: bool,
    truncate_output: bool,
    calls: AtomicUsize,
    queries: Mutex<Vec<String>>,
}

impl MockRelevanceModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_score(mut self, document: &str, score: f32) -> Self {
        self.scores.insert(document.to_string(), score);
        self
    }

    pub fn with_default_score(mut self, score: f32) -> Self {
        self.default_score = score;
        self
    }

    /// Makes every prediction fail.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Returns one score fewer than requested.
    pub fn with_short_output(mut self) -> Self {
        self.truncate_output = true;
        self
    }

    /// Number of `predict` calls.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Queries passed to `predict`, one per pair.
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().clone()
    }
}

impl RelevanceModel for MockRelevanceModel {
    fn predict(&self, pairs: &[(&str, &str)]) -> Result<Vec<f32>, RankingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.fail {
            return Err(RankingError::ComputationFailed {
                reason: "mock model failure".to_string(),
            });
        }

        let mut queries = self.queries.lock();
        let mut scores: Vec<f32> = pairs
            .iter()
            .map(|(query, document)| {
                queries.push(query.to_string());
                self.scores
                    .get(*document)
                    .copied()
                    .unwrap_or(self.default_score)
            })
            .collect();

        if self.truncate_output {
            scores.pop();
        }

        Ok(scores)
    }
}
