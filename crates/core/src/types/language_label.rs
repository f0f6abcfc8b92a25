use serde::{Deserialize, Serialize};

/// A detected language and the detector's confidence in it.
///
/// `code` carries the optional `_Latn` suffix (e.g. `"hi_Latn"`) as a plain
/// string rather than a separate enum variant, since the suffix composes
/// with any of several base ISO codes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageLabel {
    pub code: String,
    pub confidence: f32,
}

impl LanguageLabel {
    pub fn new(code: impl Into<String>, confidence: f32) -> Self {
        Self {
            code: code.into(),
            confidence,
        }
    }

    /// True if `code` carries the romanized (`_Latn`) suffix.
    pub fn is_romanized(&self) -> bool {
        self.code.ends_with("_Latn")
    }

    /// Base ISO code with any `_Latn` suffix stripped.
    pub fn base_code(&self) -> &str {
        self.code.strip_suffix("_Latn").unwrap_or(&self.code)
    }
}
