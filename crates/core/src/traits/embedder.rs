use async_trait::async_trait;

use crate::types::Embedding;

/// Pluggable text-embedding backend.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Embedding, crate::error::CoreError>;

    /// Dimension produced by this embedder, bound at construction from the
    /// loaded model.
    fn dim(&self) -> usize;
}
