//! Cross-encoder model plumbing.
//!
//! - [`reranker`] scores `(query, document)` pairs, used by [`crate::ranking`].

/// BERT relevance classifier used by the reranker.
pub mod bert;
/// Device selection (CPU / Metal / CUDA).
pub mod device;
/// Cross-encoder reranker.
pub mod reranker;
/// Tokenizer loading helpers.
pub mod utils;

pub use reranker::{Reranker, RerankerConfig, RerankerError};
