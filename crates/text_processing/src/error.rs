use thiserror::Error;

#[derive(Error, Debug)]
pub enum TextProcessingError {
    #[error("tokenizer unavailable in strict mode: {0}")]
    StrictTokenizerMissing(String),

    #[error("language identification model missing: {0}")]
    LidModelMissing(String),

    #[error("transliteration service unhealthy: {0}")]
    TransliterationUnhealthy(String),

    #[error("transliteration request failed: {0}")]
    TransliterationRequest(#[from] reqwest::Error),

    #[error("code-mix classifier inference failed: {0}")]
    ClassifierInference(String),

    #[error(transparent)]
    Core(#[from] qprep_core::CoreError),
}
