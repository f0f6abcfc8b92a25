use crate::types::{ScriptClassification, Token};

/// Pluggable code-mix / script-class classifier.
pub trait CodeMixClassifier: Send + Sync {
    fn classify(&self, tokens: &[Token], language_code: &str, language_confidence: f32) -> ScriptClassification;
}
