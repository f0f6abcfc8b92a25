//! Sentence-embedding ONNX backend, grounded on the donor crate's
//! `rag/src/embeddings.rs` mean-pooling inference pattern.

use std::path::Path;

use ndarray::Array2;
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use ort::value::Tensor;
use tokenizers::Tokenizer;

pub struct OnnxEmbeddingModel {
    session: Session,
    tokenizer: Tokenizer,
    dim: usize,
    max_seq_len: usize,
}

impl OnnxEmbeddingModel {
    pub fn load(model_path: &Path, tokenizer_path: &Path, dim: usize) -> Result<Self, String> {
        let session = Session::builder()
            .map_err(|e| e.to_string())?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| e.to_string())?
            .commit_from_file(model_path)
            .map_err(|e| e.to_string())?;

        let tokenizer = Tokenizer::from_file(tokenizer_path).map_err(|e| e.to_string())?;

        Ok(Self {
            session,
            tokenizer,
            dim,
            max_seq_len: 256,
        })
    }

    pub fn embed(&self, text: &str) -> Result<Vec<f32>, String> {
        let encoding = self.tokenizer.encode(text, true).map_err(|e| e.to_string())?;
        let ids = encoding.get_ids();
        let mask = encoding.get_attention_mask();
        let len = ids.len().min(self.max_seq_len);

        let input_ids: Vec<i64> = ids[..len].iter().map(|&id| id as i64).collect();
        let attention_mask: Vec<i64> = mask[..len].iter().map(|&m| m as i64).collect();

        let input_ids = Array2::from_shape_vec((1, len), input_ids).map_err(|e| e.to_string())?;
        let attention_mask_arr = Array2::from_shape_vec((1, len), attention_mask.clone()).map_err(|e| e.to_string())?;

        let input_ids_tensor = Tensor::from_array(input_ids).map_err(|e| e.to_string())?;
        let attention_mask_tensor = Tensor::from_array(attention_mask_arr).map_err(|e| e.to_string())?;

        let outputs = self
            .session
            .run(ort::inputs![
                "input_ids" => input_ids_tensor,
                "attention_mask" => attention_mask_tensor,
            ])
            .map_err(|e| e.to_string())?;

        let (shape, hidden) = outputs
            .get("last_hidden_state")
            .ok_or_else(|| "missing last_hidden_state output".to_string())?
            .try_extract_tensor::<f32>()
            .map_err(|e| e.to_string())?;

        let dims: Vec<usize> = shape.iter().map(|&d| d as usize).collect();
        if dims.len() != 3 {
            return Err(format!("unexpected tensor shape: {:?}", dims));
        }
        let (seq_len, hidden_dim) = (dims[1], dims[2]);

        let mut pooled = vec![0.0f32; self.dim.min(hidden_dim)];
        let mut valid_tokens = 0usize;
        for j in 0..seq_len.min(len) {
            if attention_mask[j] == 0 {
                continue;
            }
            valid_tokens += 1;
            for k in 0..pooled.len() {
                let idx = j * hidden_dim + k;
                if idx < hidden.len() {
                    pooled[k] += hidden[idx];
                }
            }
        }

        if valid_tokens > 0 {
            for v in &mut pooled {
                *v /= valid_tokens as f32;
            }
        }

        Ok(pooled)
    }
}
