use serde::{Deserialize, Serialize};

use super::script_tag::ScriptTag;

/// A single tokenized unit with its dominant script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    pub tag: ScriptTag,
}

impl Token {
    pub fn new(text: impl Into<String>, tag: ScriptTag) -> Self {
        Self {
            text: text.into(),
            tag,
        }
    }
}
