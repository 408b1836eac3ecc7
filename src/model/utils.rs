use std::io;
use std::path::Path;
use tokenizers::{PaddingParams, PaddingStrategy, Tokenizer, TruncationParams};

/// Loads `tokenizer.json` from a checkpoint directory.
pub fn load_tokenizer(model_dir: &Path) -> io::Result<Tokenizer> {
    Tokenizer::from_file(model_dir.join("tokenizer.json")).map_err(io::Error::other)
}

/// Loads a tokenizer set up for batched pair scoring.
///
/// Pairs longer than `max_len` tokens are truncated, and every batch is padded
/// to its longest member so encodings can be stacked into one tensor.
pub fn load_pair_tokenizer(model_dir: &Path, max_len: usize) -> io::Result<Tokenizer> {
    let mut tokenizer = load_tokenizer(model_dir)?;

    let truncation = TruncationParams {
        max_length: max_len,
        ..Default::default()
    };

    tokenizer
        .with_truncation(Some(truncation))
        .map_err(|e| io::Error::other(format!("Failed to configure truncation: {}", e)))?;

    tokenizer.with_padding(Some(PaddingParams {
        strategy: PaddingStrategy::BatchLongest,
        ..Default::default()
    }));

    Ok(tokenizer)
}
