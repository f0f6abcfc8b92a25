//! Embedding generation, vector search, product resolution, and
//! synonym-based query expansion stages of the query preprocessing
//! pipeline.

pub mod embedder;
pub mod error;
pub mod product_resolver;
pub mod synonym_mapper;
pub mod vector_search;

pub use embedder::OnnxEmbedder;
pub use error::RagError;
pub use product_resolver::HttpProductResolver;
pub use synonym_mapper::SynonymMapper;
pub use vector_search::QdrantVectorSearch;
