//! Smart Romanized Detector (§4.4): four weighted signals (65/15/10/10)
//! scoring {hi_Latn, bn_Latn, en}, with an English-favoring tie-break.
//! Grounded on `smart_romanized_detector.py`.

use once_cell::sync::Lazy;
use regex::Regex;

use qprep_config::constants::romanized_detector as thresholds;

use crate::markers::{
    CHAR_FREQUENCY_BN, CHAR_FREQUENCY_EN, CHAR_FREQUENCY_HI, CORE_BENGALI_WORDS,
    CORE_HINDI_WORDS, NGRAMS_BN, NGRAMS_HI,
};

static HINDI_PHONETIC: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"^[kgc]h[aeiou]").unwrap(),
        Regex::new(r"[aeiou]{2}").unwrap(),
        Regex::new(r"^[ptk]h").unwrap(),
    ]
});

static BENGALI_PHONETIC: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"[aeiou]r$").unwrap(),
        Regex::new(r"^[ptk]h[aeiou]").unwrap(),
        Regex::new(r"[oy]e$").unwrap(),
    ]
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Label {
    HiLatn,
    BnLatn,
    En,
}

impl Label {
    fn as_code(&self) -> &'static str {
        match self {
            Label::HiLatn => "hi_Latn",
            Label::BnLatn => "bn_Latn",
            Label::En => "en",
        }
    }
}

pub struct SmartRomanizedDetector;

impl Default for SmartRomanizedDetector {
    fn default() -> Self {
        Self
    }
}

impl SmartRomanizedDetector {
    pub fn new() -> Self {
        Self
    }

    /// Returns `Some((language_code, confidence))` only for a non-English
    /// result meeting the acceptance threshold; `None` otherwise (§4.4).
    pub fn detect(&self, text: &str) -> Option<(String, f32)> {
        self.detect_at(text, thresholds::ACCEPTANCE_THRESHOLD)
    }

    /// Same scoring as `detect`, but gated on a caller-supplied threshold
    /// instead of the detector's own `ACCEPTANCE_THRESHOLD`. Used by the
    /// tokenizer's fast-path step (§4.3 step (d)), which accepts a looser
    /// `LID_FASTPATH_THRESHOLD`.
    pub fn detect_at(&self, text: &str, threshold: f32) -> Option<(String, f32)> {
        let (best, best_score) = self.best_label(text)?;
        if best == Label::En || best_score < threshold {
            return None;
        }
        Some((best.as_code().to_string(), best_score))
    }

    fn best_label(&self, text: &str) -> Option<(Label, f32)> {
        let lower = text.to_lowercase();
        let words: Vec<&str> = lower.split_whitespace().collect();
        if words.is_empty() {
            return None;
        }

        let hi_score = self.score_language(&lower, &words, &CORE_HINDI_WORDS, &NGRAMS_HI, &CHAR_FREQUENCY_HI, &HINDI_PHONETIC);
        let bn_score = self.score_language(&lower, &words, &CORE_BENGALI_WORDS, &NGRAMS_BN, &CHAR_FREQUENCY_BN, &BENGALI_PHONETIC);
        let en_score = self.score_english(&lower, &words);

        let mut best = Label::En;
        let mut best_score = en_score;
        if hi_score > best_score {
            best = Label::HiLatn;
            best_score = hi_score;
        }
        if bn_score > best_score {
            best = Label::BnLatn;
            best_score = bn_score;
        }

        // Tie-break: if English wins narrowly, prefer the stronger Indic label.
        if best == Label::En {
            let indic_best = hi_score.max(bn_score);
            if en_score - indic_best <= thresholds::ENGLISH_TIEBREAK_MARGIN && indic_best > 0.0 {
                best = if hi_score >= bn_score { Label::HiLatn } else { Label::BnLatn };
                best_score = indic_best;
            }
        }

        Some((best, best_score))
    }

    fn score_language(
        &self,
        lower: &str,
        words: &[&str],
        core_words: &once_cell::sync::Lazy<std::collections::HashSet<&'static str>>,
        ngrams: &once_cell::sync::Lazy<std::collections::HashSet<&'static str>>,
        char_freq: &once_cell::sync::Lazy<std::collections::HashMap<char, f32>>,
        phonetic: &once_cell::sync::Lazy<Vec<Regex>>,
    ) -> f32 {
        let matches = words.iter().filter(|w| core_words.contains(*w)).count();
        let core_word_score = (matches as f32 * 0.25).min(1.0);

        let ngram_hits = words.iter().filter(|w| ngrams.contains(*w)).count();
        let ngram_score = (ngram_hits as f32 / words.len() as f32).min(1.0);

        let freq_score = char_frequency_cosine(lower, char_freq);

        let phonetic_hits = words.iter().filter(|w| phonetic.iter().any(|p| p.is_match(w))).count();
        let phonetic_score = (phonetic_hits as f32 / words.len() as f32).min(1.0);

        thresholds::WEIGHT_CORE_WORD * core_word_score
            + thresholds::WEIGHT_NGRAM * ngram_score
            + thresholds::WEIGHT_CHAR_FREQUENCY * freq_score
            + thresholds::WEIGHT_PHONETIC * phonetic_score
    }

    fn score_english(&self, lower: &str, words: &[&str]) -> f32 {
        let indic_hint = words.iter().any(|w| CORE_HINDI_WORDS.contains(w) || CORE_BENGALI_WORDS.contains(w));
        if !indic_hint {
            return 1.0;
        }
        char_frequency_cosine(lower, &CHAR_FREQUENCY_EN)
    }
}

fn char_frequency_cosine(text: &str, reference: &std::collections::HashMap<char, f32>) -> f32 {
    let mut observed: std::collections::HashMap<char, f32> = std::collections::HashMap::new();
    let mut total = 0.0f32;
    for c in text.chars().filter(|c| c.is_alphabetic()) {
        *observed.entry(c).or_insert(0.0) += 1.0;
        total += 1.0;
    }
    if total == 0.0 {
        return 0.0;
    }
    for v in observed.values_mut() {
        *v /= total;
    }

    let dot: f32 = reference.iter().map(|(c, rf)| rf * observed.get(c).copied().unwrap_or(0.0)).sum();
    let ref_norm: f32 = reference.values().map(|v| v * v).sum::<f32>().sqrt();
    let obs_norm: f32 = observed.values().map(|v| v * v).sum::<f32>().sqrt();
    if ref_norm == 0.0 || obs_norm == 0.0 {
        return 0.0;
    }
    dot / (ref_norm * obs_norm)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_romanized_hindi() {
        let detector = SmartRomanizedDetector::new();
        let result = detector.detect("mujhe naya mobile chahiye kya hai accha");
        assert!(result.is_some());
        let (lang, conf) = result.unwrap();
        assert_eq!(lang, "hi_Latn");
        assert!(conf >= thresholds::ACCEPTANCE_THRESHOLD);
    }

    #[test]
    fn pure_english_returns_none() {
        let detector = SmartRomanizedDetector::new();
        assert!(detector.detect("show me the best laptop under price").is_none());
    }

    #[test]
    fn empty_text_returns_none() {
        let detector = SmartRomanizedDetector::new();
        assert!(detector.detect("").is_none());
    }

    #[test]
    fn detect_at_uses_caller_supplied_threshold_not_acceptance_threshold() {
        let detector = SmartRomanizedDetector::new();
        let text = "mujhe naya mobile chahiye kya hai accha";
        let (label, score) = detector.best_label(text).unwrap();
        assert_ne!(label, Label::En);
        assert!(detector.detect_at(text, 0.0).is_some());
        assert!(detector.detect_at(text, score + 0.5).is_none());
    }
}
