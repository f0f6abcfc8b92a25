use serde::{Deserialize, Serialize};

use crate::types::{LanguageLabel, Token};

/// How a tokenization/LID result was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenizerMethod {
    Strict,
    RegexFallback,
}

/// Combined tokenization, script tagging and language identification
/// result for one query, since the donor source runs these three
/// conceptually-parallel actions sequentially in practice (§4.3/§4.12).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenizeResult {
    pub tokens: Vec<Token>,
    pub language: LanguageLabel,
    pub method: TokenizerMethod,
}

/// Pluggable tokenizer + script tagger + language identifier.
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> TokenizeResult;
}
