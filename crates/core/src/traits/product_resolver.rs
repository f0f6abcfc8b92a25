use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// An opaque resolved product, per spec.md §3's "Product (opaque)".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub data: serde_json::Value,
}

/// External collaborator that turns vector-search hits into full product
/// records (spec.md §4.10/§6.4). Interface-only: out of scope to implement
/// beyond the HTTP contract.
#[async_trait]
pub trait ProductResolver: Send + Sync {
    async fn resolve(&self, ids: &[String]) -> Result<Vec<Product>, crate::error::CoreError>;
    async fn get_by_code(&self, code: &str) -> Result<Option<Product>, crate::error::CoreError>;
}
