use thiserror::Error;

#[derive(Error, Debug)]
pub enum RagError {
    #[error("embedding model missing: {0}")]
    EmbeddingModelMissing(String),

    #[error("embedding inference failed: {0}")]
    Embedding(String),

    #[error("vector search request failed: {0}")]
    Search(String),

    #[error("product resolver request failed: {0}")]
    Resolver(String),

    #[error(transparent)]
    Core(#[from] qprep_core::CoreError),
}
