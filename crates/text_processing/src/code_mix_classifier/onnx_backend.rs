//! Quantized ONNX code-mix classifier (5-class softmax), loaded only when
//! the `onnx` feature is enabled and a model path is configured. Mirrors
//! the donor crate's `ort::Session` usage in `rag/src/embeddings.rs`.

use std::path::Path;

use ndarray::Array2;
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use ort::value::Tensor;
use tokenizers::Tokenizer;

use qprep_core::{ClassificationMethod, ScriptClassLabel, ScriptClassification};

const LABELS: [ScriptClassLabel; 5] = [
    ScriptClassLabel::PureEnglish,
    ScriptClassLabel::PureNative,
    ScriptClassLabel::RomanizedIndic,
    ScriptClassLabel::Mixed,
    ScriptClassLabel::Ambiguous,
];

pub struct OnnxCodeMixModel {
    session: Session,
    tokenizer: Tokenizer,
}

impl OnnxCodeMixModel {
    pub fn load(model_path: &Path) -> Result<Self, String> {
        let session = Session::builder()
            .map_err(|e| e.to_string())?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| e.to_string())?
            .commit_from_file(model_path)
            .map_err(|e| e.to_string())?;

        let tokenizer_path = model_path.with_file_name("tokenizer.json");
        let tokenizer = Tokenizer::from_file(&tokenizer_path).map_err(|e| e.to_string())?;

        Ok(Self { session, tokenizer })
    }

    pub fn classify(&self, text: &str) -> Result<ScriptClassification, String> {
        let encoding = self.tokenizer.encode(text, true).map_err(|e| e.to_string())?;
        let ids: Vec<i64> = encoding.get_ids().iter().map(|&id| id as i64).collect();
        let len = ids.len();

        let input = Array2::from_shape_vec((1, len), ids).map_err(|e| e.to_string())?;
        let tensor = Tensor::from_array(input).map_err(|e| e.to_string())?;

        let outputs = self
            .session
            .run(ort::inputs!["input_ids" => tensor])
            .map_err(|e| e.to_string())?;

        let (_, logits) = outputs
            .get("logits")
            .ok_or_else(|| "missing logits output tensor".to_string())?
            .try_extract_tensor::<f32>()
            .map_err(|e| e.to_string())?;

        let probabilities = softmax(logits);
        let (best_idx, &best_prob) = probabilities
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap())
            .ok_or_else(|| "empty logits".to_string())?;

        Ok(ScriptClassification {
            label: LABELS[best_idx],
            confidence: best_prob,
            method: ClassificationMethod::SmartCheckpointMl,
            skip_step5: false,
            romanized_language: None,
        })
    }
}

fn softmax(logits: &[f32]) -> Vec<f32> {
    let max = logits.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = logits.iter().map(|&x| (x - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    exps.into_iter().map(|x| x / sum).collect()
}
