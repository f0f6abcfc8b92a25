use async_trait::async_trait;

/// A single correction applied to the input text.
#[derive(Debug, Clone, PartialEq)]
pub struct Correction {
    pub original: String,
    pub corrected: String,
}

/// Pluggable spell-correction backend.
#[async_trait]
pub trait SpellCorrector: Send + Sync {
    async fn correct(&self, text: &str, apply_unit_normalization: bool) -> (String, Vec<Correction>);
}
