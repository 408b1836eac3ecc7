pub mod config;
pub mod error;


pub use config::{DEFAULT_BATCH_SIZE, MAX_SEQ_LEN, RerankerConfig};
pub use error::RerankerError;

use std::collections::HashSet;
use std::path::Path;

use candle_core::{Device, Tensor};
use tokenizers::{Encoding, Tokenizer};
use tracing::{debug, info};

use crate::model::bert::BertClassifier;
use crate::model::device::select_device;
use crate::model::utils::load_pair_tokenizer;

/// Files a cross-encoder checkpoint directory must contain.
const CHECKPOINT_FILES: [&str; 3] = ["config.json", "model.safetensors", "tokenizer.json"];

/// Words ignored by the lexical stub scorer.
const STOP_WORDS: &[&str] = &[
    "a", "about", "all", "am", "an", "and", "are", "as", "ask", "at", "be", "but", "by", "can",
    "do", "for", "from", "has", "have", "hn", "how", "i", "if", "in", "interested", "into", "is",
    "it", "its", "like", "me", "my", "no", "not", "of", "on", "or", "show", "so", "that", "the",
    "this", "to", "was", "what", "when", "where", "who", "why", "with",
];

struct LoadedModel {
    classifier: BertClassifier,
    tokenizer: Tokenizer,
}

/// Cross-encoder relevance scorer.
///
/// With a checkpoint directory configured, pairs are scored by a BERT
/// sequence-classification head (raw logits, higher is more relevant).
/// Without one, a deterministic lexical-overlap stub stands in.
pub struct Reranker {
    device: Device,
    config: RerankerConfig,
    model: Option<LoadedModel>,
}

impl std::fmt::Debug for Reranker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reranker")
            .field("device", &self.device.location())
            .field("config", &self.config)
            .field("model_loaded", &self.is_model_loaded())
            .finish()
    }
}

impl Reranker {
    /// Loads the checkpoint named by `config`, or the stub scorer if none is set.
    ///
    /// Blocking: reads and maps the weights from disk.
    pub fn load(config: RerankerConfig) -> Result<Self, RerankerError> {
        config
            .validate()
            .map_err(|reason| RerankerError::InvalidConfig { reason })?;

        let device = select_device();

        let model = match config.model_path.as_deref() {
            Some(dir) => Some(load_checkpoint(dir, &device, config.max_seq_len)?),
            None => {
                info!("No reranker checkpoint configured, scoring by term overlap");
                None
            }
        };

        Ok(Self {
            device,
            config,
            model,
        })
    }

    pub fn stub() -> Result<Self, RerankerError> {
        Self::load(RerankerConfig::stub())
    }

    pub fn is_model_loaded(&self) -> bool {
        self.model.is_some()
    }

    pub fn config(&self) -> &RerankerConfig {
        &self.config
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    /// Scores a single `(query, document)` pair.
    pub fn score(&self, query: &str, document: &str) -> Result<f32, RerankerError> {
        let scores = self.predict(&[(query, document)])?;
        scores
            .first()
            .copied()
            .ok_or(RerankerError::ScoreCountMismatch {
                expected: 1,
                got: 0,
            })
    }

    /// Scores every pair, returning one score per pair in input order.
    ///
    /// Model inference runs in chunks of `batch_size` pairs.
    pub fn predict(&self, pairs: &[(&str, &str)]) -> Result<Vec<f32>, RerankerError> {
        let scores = match &self.model {
            Some(model) => {
                let mut scores = Vec::with_capacity(pairs.len());
                for chunk in pairs.chunks(self.config.batch_size) {
                    scores.extend(self.infer(model, chunk)?);
                }
                scores
            }
            None => pairs
                .iter()
                .map(|(query, document)| lexical_score(query, document))
                .collect(),
        };

        debug!(pairs = pairs.len(), model = self.is_model_loaded(), "Scored pairs");

        if scores.len() != pairs.len() {
            return Err(RerankerError::ScoreCountMismatch {
                expected: pairs.len(),
                got: scores.len(),
            });
        }
        Ok(scores)
    }

    fn infer(
        &self,
        model: &LoadedModel,
        pairs: &[(&str, &str)],
    ) -> Result<Vec<f32>, RerankerError> {
        let encodings = model
            .tokenizer
            .encode_batch(pairs.to_vec(), true)
            .map_err(|e| RerankerError::TokenizationFailed {
                reason: e.to_string(),
            })?;

        let input_ids = self.batch_tensor(&encodings, Encoding::get_ids)?;
        let type_ids = self.batch_tensor(&encodings, Encoding::get_type_ids)?;
        // Padding positions are zero in the mask, so they do not attend.
        let mask = self.batch_tensor(&encodings, Encoding::get_attention_mask)?;

        let logits = model.classifier.forward(&input_ids, &type_ids, &mask)?;
        Ok(logits.flatten_all()?.to_vec1::<f32>()?)
    }

    /// Stacks one `u32` field of every encoding into a `(batch, seq)` tensor.
    fn batch_tensor(
        &self,
        encodings: &[Encoding],
        field: fn(&Encoding) -> &[u32],
    ) -> Result<Tensor, RerankerError> {
        let rows = encodings
            .iter()
            .map(|encoding| Tensor::new(field(encoding), &self.device))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Tensor::stack(&rows, 0)?)
    }
}

fn load_checkpoint(
    dir: &Path,
    device: &Device,
    max_seq_len: usize,
) -> Result<LoadedModel, RerankerError> {
    if !dir.is_dir() {
        return Err(RerankerError::ModelNotFound {
            path: dir.to_path_buf(),
        });
    }
    if let Some(file) = CHECKPOINT_FILES.into_iter().find(|f| !dir.join(f).is_file()) {
        return Err(RerankerError::MissingModelFile {
            dir: dir.to_path_buf(),
            file,
        });
    }

    info!(dir = %dir.display(), "Loading reranker checkpoint");

    let load_failed = |reason: String| RerankerError::ModelLoadFailed {
        dir: dir.to_path_buf(),
        reason,
    };
    let classifier = BertClassifier::load(dir, device).map_err(|e| load_failed(e.to_string()))?;
    let tokenizer = load_pair_tokenizer(dir, max_seq_len).map_err(|e| load_failed(e.to_string()))?;

    info!("Reranker checkpoint loaded");
    Ok(LoadedModel {
        classifier,
        tokenizer,
    })
}

fn terms(text: &str) -> HashSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .filter(|w| !STOP_WORDS.contains(&w.as_str()))
        .collect()
}

/// Term-overlap score in `[0, 1]`: `0.7 * recall + 0.3 * jaccard` of the
/// query's non-stop-word terms against the document's.
fn lexical_score(query: &str, document: &str) -> f32 {
    let query_terms = terms(query);
    if query_terms.is_empty() {
        return 0.0;
    }
    let document_terms = terms(document);

    let shared = query_terms.intersection(&document_terms).count() as f32;
    let union = query_terms.union(&document_terms).count() as f32;
    let recall = shared / query_terms.len() as f32;
    let jaccard = shared / union;

    (0.7 * recall + 0.3 * jaccard).clamp(0.0, 1.0)
}
