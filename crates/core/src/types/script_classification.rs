use serde::{Deserialize, Serialize};

/// The script-mixing label assigned to a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptClassLabel {
    PureEnglish,
    PureNative,
    RomanizedIndic,
    Mixed,
    Ambiguous,
}

/// How a `ScriptClassification` was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationMethod {
    FastLane,
    SmartCheckpointMl,
    SmartCheckpointFallback,
    Heuristic,
    OnnxFailed,
}

/// Output of the code-mix classifier for one query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptClassification {
    pub label: ScriptClassLabel,
    pub confidence: f32,
    pub method: ClassificationMethod,
    /// True when feature extraction's step 5 (transliteration) can be
    /// skipped because the query is already confidently pure.
    pub skip_step5: bool,
    /// Populated only for `RomanizedIndic`: the language the Smart
    /// Romanized Detector believes the query is written in.
    pub romanized_language: Option<String>,
}
