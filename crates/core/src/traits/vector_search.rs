use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::types::Embedding;

/// Optional filters applied server-side by the vector index.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchFilter {
    pub category_eq: Option<String>,
    pub price_lte: Option<f64>,
}

/// A single scored hit from the vector index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: String,
    pub score: f32,
    pub metadata: serde_json::Value,
}

/// Thin adapter over the external vector index. Out of scope except for
/// the interface shape (spec.md §4.10/§6.3).
#[async_trait]
pub trait VectorSearch: Send + Sync {
    async fn search(
        &self,
        embedding: &Embedding,
        top_k: usize,
        filter: Option<&SearchFilter>,
    ) -> Result<Vec<SearchHit>, crate::error::CoreError>;
}
