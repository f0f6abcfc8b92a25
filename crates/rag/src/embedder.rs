//! Embedding Generator (§4.9): wraps a sentence-embedding ONNX model,
//! L2-normalizes output, LRU(5,000) cached. Grounded on
//! `rag/src/embeddings.rs`.

use std::num::NonZeroUsize;
use std::path::Path;

use async_trait::async_trait;
use parking_lot::Mutex;

use qprep_config::constants::caches;
use qprep_core::{CoreError, Embedder as EmbedderTrait, Embedding};

#[cfg(feature = "onnx")]
mod onnx_backend;

pub struct OnnxEmbedder {
    #[cfg(feature = "onnx")]
    backend: onnx_backend::OnnxEmbeddingModel,
    dim: usize,
    cache: Mutex<lru::LruCache<String, Embedding>>,
}

impl OnnxEmbedder {
    #[cfg(feature = "onnx")]
    pub fn load(model_path: &Path, tokenizer_path: &Path, dim: usize) -> Result<Self, CoreError> {
        let backend = onnx_backend::OnnxEmbeddingModel::load(model_path, tokenizer_path, dim)
            .map_err(CoreError::EmbeddingModel)?;
        Ok(Self {
            backend,
            dim,
            cache: Mutex::new(lru::LruCache::new(NonZeroUsize::new(caches::EMBEDDING_LRU).unwrap())),
        })
    }

    #[cfg(not(feature = "onnx"))]
    pub fn stub(dim: usize) -> Self {
        Self {
            dim,
            cache: Mutex::new(lru::LruCache::new(NonZeroUsize::new(caches::EMBEDDING_LRU).unwrap())),
        }
    }

    fn embed_sync(&self, text: &str) -> Result<Embedding, CoreError> {
        if let Some(cached) = self.cache.lock().get(text) {
            return Ok(cached.clone());
        }

        #[cfg(feature = "onnx")]
        let vector = self.backend.embed(text).map_err(CoreError::EmbeddingModel)?;

        #[cfg(not(feature = "onnx"))]
        let vector: Vec<f32> = {
            let _ = text;
            vec![0.0; self.dim]
        };

        let embedding = Embedding::new(l2_normalize(vector));

        self.cache.lock().put(text.to_string(), embedding.clone());
        Ok(embedding)
    }
}

fn l2_normalize(mut vector: Vec<f32>) -> Vec<f32> {
    let norm: f32 = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm > 0.0 {
        for v in &mut vector {
            *v /= norm;
        }
    }
    vector
}

#[async_trait]
impl EmbedderTrait for OnnxEmbedder {
    async fn embed(&self, text: &str) -> Result<Embedding, CoreError> {
        self.embed_sync(text)
    }

    fn dim(&self) -> usize {
        self.dim
    }
}
