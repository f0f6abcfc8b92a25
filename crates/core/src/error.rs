//! Shared error variants reused by downstream crates' own error enums.

use thiserror::Error;

/// Errors that can originate from core type construction or shared
/// validation logic, independent of any particular pipeline stage.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("invalid embedding dimension: expected {expected}, got {actual}")]
    InvalidEmbeddingDimension { expected: usize, actual: usize },

    #[error("empty input")]
    EmptyInput,

    #[error("unsupported target language: {0}")]
    UnsupportedTargetLanguage(String),

    #[error("transliteration service unavailable")]
    TransliterationUnavailable,

    #[error("embedding model error: {0}")]
    EmbeddingModel(String),

    #[error("vector search backend error: {0}")]
    VectorSearchBackend(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
