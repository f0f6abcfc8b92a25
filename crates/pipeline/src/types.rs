//! Pipeline-level data model (§3): `RawInput`/`ProcessedInput` belong here
//! rather than in `qprep-core` since they are exclusively produced and
//! consumed by the Input Adapter and orchestrator.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use qprep_core::{FeatureBag, LanguageLabel, Product, ScriptClassification, TokenizeResult};

/// Classification of a raw query string by the Input Adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputType {
    Text,
    Url,
}

/// Output of the Input Adapter (§4.1). `query_text` is always non-empty
/// after processing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessedInput {
    pub input_type: InputType,
    pub query_text: String,
    pub platform: Option<String>,
    pub product_id: Option<String>,
    pub product_data: Option<serde_json::Value>,
    pub expanded_url: Option<String>,
    pub cache_hit: bool,
}

impl ProcessedInput {
    pub fn text(query_text: impl Into<String>) -> Self {
        Self {
            input_type: InputType::Text,
            query_text: query_text.into(),
            platform: None,
            product_id: None,
            product_data: None,
            expanded_url: None,
            cache_hit: false,
        }
    }
}

/// Per-stage elapsed time, in milliseconds, keyed by stage name.
pub type StageTimes = HashMap<&'static str, f64>;

/// Aggregate metrics attached to the final pipeline result.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineMetrics {
    pub total_latency_ms: f64,
    pub stage_times: StageTimes,
    pub cache_hit_rate: f32,
    pub optimizations_applied: Vec<String>,
    pub early_exit: bool,
}

/// Final output of one `process` call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineResult {
    pub query_text: String,
    pub language: LanguageLabel,
    pub tokenization: TokenizeResult,
    pub classification: ScriptClassification,
    pub english_text: String,
    pub features: FeatureBag,
    pub synonyms: Vec<String>,
    pub products: Vec<Product>,
    pub metrics: PipelineMetrics,
}

/// Used internally to accumulate stage latencies without threading a
/// mutable map through every stage call by hand.
pub struct StageTimer {
    pub times: StageTimes,
}

impl StageTimer {
    pub fn new() -> Self {
        Self { times: StageTimes::new() }
    }

    pub fn record(&mut self, stage: &'static str, elapsed: std::time::Duration) {
        self.times.insert(stage, elapsed.as_secs_f64() * 1000.0);
    }
}

impl Default for StageTimer {
    fn default() -> Self {
        Self::new()
    }
}
