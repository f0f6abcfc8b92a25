//! Tokenizer + Script Tagger + Language Identifier (§4.3). Grounded on
//! `tokenizer.py`.
//!
//! Tokenization prefers a Rust-backed fast pre-tokenizer (whitespace +
//! isolated punctuation, no vocabulary) built from the `tokenizers` crate;
//! a non-strict regex fallback is used when the fast pre-tokenizer cannot
//! be constructed. Script tagging runs a cheap first-character fast path
//! before falling back to a per-character dominant-block vote. Language
//! identification runs once per query after the fast-path chain described
//! in the module README.

mod fallback;
mod script;

use std::num::NonZeroUsize;

use parking_lot::Mutex;
use tokenizers::pre_tokenizers::punctuation::Punctuation;
use tokenizers::pre_tokenizers::sequence::Sequence;
use tokenizers::pre_tokenizers::whitespace::Whitespace;
use tokenizers::{OffsetReferential, OffsetType, PreTokenizedString, PreTokenizer};

use qprep_config::constants::{caches, lid, romanized_detector as romanized_thresholds};
use qprep_core::{LanguageLabel, Token, TokenizeResult, Tokenizer as TokenizerTrait, TokenizerMethod};

use crate::markers::{ENGLISH_MARKERS, HINDI_MARKERS};
use crate::romanized_detector::SmartRomanizedDetector;

use self::script::classify_token;

/// Production tokenizer: fast whitespace+punctuation pre-tokenizer with a
/// regex fallback, per-token script tagging, and the fast-path language
/// identification chain.
pub struct EcommerceTokenizer {
    fast_pre_tokenizer: Option<Sequence>,
    romanized_detector: SmartRomanizedDetector,
    cache: Mutex<lru::LruCache<String, TokenizeResult>>,
}

impl EcommerceTokenizer {
    pub fn new() -> Self {
        let fast_pre_tokenizer = Some(Sequence::new(vec![
            Whitespace {}.into(),
            Punctuation::default().into(),
        ]));

        Self {
            fast_pre_tokenizer,
            romanized_detector: SmartRomanizedDetector::new(),
            cache: Mutex::new(lru::LruCache::new(
                NonZeroUsize::new(caches::TOKENIZATION_LRU).unwrap(),
            )),
        }
    }

    fn split(&self, text: &str) -> (Vec<String>, TokenizerMethod) {
        if let Some(pre_tokenizer) = &self.fast_pre_tokenizer {
            let mut pretokenized = PreTokenizedString::from(text);
            if pre_tokenizer.pre_tokenize(&mut pretokenized).is_ok() {
                let words: Vec<String> = pretokenized
                    .get_splits(OffsetReferential::Original, OffsetType::Byte)
                    .into_iter()
                    .map(|(word, _, _)| word.to_string())
                    .filter(|w| !w.trim().is_empty())
                    .collect();
                return (words, TokenizerMethod::Strict);
            }
        }
        (fallback::regex_split(text), TokenizerMethod::RegexFallback)
    }

    fn identify_language(&self, text: &str, words: &[String]) -> (String, f32) {
        let lower_words: Vec<String> = words.iter().map(|w| w.to_lowercase()).collect();

        let has_native_script = text.chars().any(|c| {
            let tag = qprep_core::ScriptTag::of_char(c);
            tag.is_native_indic()
        });

        let hindi_hits = lower_words.iter().filter(|w| HINDI_MARKERS.contains(w.as_str())).count();
        if hindi_hits >= 2 {
            return ("hi".to_string(), lid::ROMANIZED_MARKER_CONFIDENCE);
        }

        if !has_native_script {
            let ascii_only = text.chars().all(|c| c.is_ascii());
            let english_hits = lower_words.iter().filter(|w| ENGLISH_MARKERS.contains(w.as_str())).count();
            if ascii_only && english_hits >= 1 {
                return ("en".to_string(), lid::ASCII_ENGLISH_CONFIDENCE);
            }
        }

        if has_native_script {
            return self.invoke_lid_model(text);
        }

        if let Some((lang, confidence)) = self
            .romanized_detector
            .detect_at(text, romanized_thresholds::LID_FASTPATH_THRESHOLD)
        {
            let base = lang.trim_end_matches("_Latn");
            return (base.to_string(), confidence);
        }

        self.invoke_lid_model(text)
    }

    /// Invokes the pretrained language-ID model. No model artifact is wired
    /// in this deployment; degrades to the Unicode-ratio fallback per the
    /// degradable-model-absence policy.
    fn invoke_lid_model(&self, text: &str) -> (String, f32) {
        script::unicode_ratio_fallback(text)
    }
}

impl Default for EcommerceTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenizerTrait for EcommerceTokenizer {
    fn tokenize(&self, text: &str) -> TokenizeResult {
        if let Some(cached) = self.cache.lock().get(text) {
            return cached.clone();
        }

        let (words, method) = self.split(text);
        let tokens: Vec<Token> = words
            .iter()
            .map(|w| Token::new(w.clone(), classify_token(w)))
            .collect();

        let (lang_code, lang_confidence) = self.identify_language(text, &words);

        let result = TokenizeResult {
            tokens,
            language: LanguageLabel {
                code: lang_code,
                confidence: lang_confidence,
            },
            method,
        };

        self.cache.lock().put(text.to_string(), result.clone());
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenizes_and_tags_mixed_script() {
        let tokenizer = EcommerceTokenizer::new();
        let result = tokenizer.tokenize("red shoes under 2000");
        assert!(!result.tokens.is_empty());
        assert_eq!(result.method, TokenizerMethod::Strict);
    }

    #[test]
    fn romanized_hindi_markers_trigger_fast_path() {
        let tokenizer = EcommerceTokenizer::new();
        let result = tokenizer.tokenize("mujhe naya mobile chahiye");
        assert_eq!(result.language.code, "hi");
        assert!((result.language.confidence - lid::ROMANIZED_MARKER_CONFIDENCE).abs() < 1e-6);
    }

    #[test]
    fn pure_ascii_english_fast_path() {
        let tokenizer = EcommerceTokenizer::new();
        let result = tokenizer.tokenize("show me the best price");
        assert_eq!(result.language.code, "en");
        assert!((result.language.confidence - lid::ASCII_ENGLISH_CONFIDENCE).abs() < 1e-6);
    }

    #[test]
    fn cache_returns_identical_result() {
        let tokenizer = EcommerceTokenizer::new();
        let first = tokenizer.tokenize("wireless earphones");
        let second = tokenizer.tokenize("wireless earphones");
        assert_eq!(first.tokens.len(), second.tokens.len());
    }
}
