//! Product Resolver (§4.10): thin HTTP adapter over the external
//! product-resolver collaborator.

use async_trait::async_trait;
use serde::Deserialize;

use qprep_core::{CoreError, Product, ProductResolver};

pub struct HttpProductResolver {
    http: reqwest::Client,
    base_url: String,
}

impl HttpProductResolver {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ResolveResponse {
    products: Vec<RawProduct>,
}

#[derive(Debug, Deserialize)]
struct RawProduct {
    id: String,
    #[serde(flatten)]
    data: serde_json::Value,
}

impl From<RawProduct> for Product {
    fn from(raw: RawProduct) -> Self {
        Product {
            id: raw.id,
            data: raw.data,
        }
    }
}

#[async_trait]
impl ProductResolver for HttpProductResolver {
    async fn resolve(&self, ids: &[String]) -> Result<Vec<Product>, CoreError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let response = self
            .http
            .post(format!("{}/resolve", self.base_url))
            .json(&serde_json::json!({ "ids": ids }))
            .send()
            .await
            .map_err(|e| CoreError::VectorSearchBackend(e.to_string()))?;

        let body: ResolveResponse = response
            .json()
            .await
            .map_err(|e| CoreError::VectorSearchBackend(e.to_string()))?;

        Ok(body.products.into_iter().map(Product::from).collect())
    }

    async fn get_by_code(&self, code: &str) -> Result<Option<Product>, CoreError> {
        let response = self
            .http
            .get(format!("{}/by-code/{code}", self.base_url))
            .send()
            .await
            .map_err(|e| CoreError::VectorSearchBackend(e.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let raw: RawProduct = response
            .json()
            .await
            .map_err(|e| CoreError::VectorSearchBackend(e.to_string()))?;

        Ok(Some(Product::from(raw)))
    }
}
