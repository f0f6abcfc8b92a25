//! Centralized tunable thresholds for the query preprocessing pipeline.
//!
//! Single source of truth for every numeric threshold named in the
//! component design, so a tuning pass touches one file instead of hunting
//! through each stage's module.

/// Code-Mix Classifier thresholds (§4.5).
pub mod code_mix {
    /// Rule A (pure_native) confidence, Fast Lane.
    pub const RULE_A_CONFIDENCE: f32 = 0.95;
    /// Rule B (pure_english) Fast Lane entry condition: LID confidence must
    /// meet this to short-circuit without invoking Smart Checkpoint.
    pub const RULE_B_LID_THRESHOLD: f32 = 0.85;
    /// Confidence floor for `pure_english` to permit `skip_step5`.
    pub const SKIP_STEP5_CONFIDENCE: f32 = 0.75;
    /// Smart Checkpoint result is only adopted above this confidence;
    /// otherwise the Fast Lane's `ambiguous` result stands.
    pub const SMART_CHECKPOINT_ADOPTION_THRESHOLD: f32 = 0.6;
    /// Pattern-fallback `mixed` confidence.
    pub const FALLBACK_MIXED_CONFIDENCE: f32 = 0.85;
    /// Pattern-fallback `romanized_indic` confidence floor.
    pub const FALLBACK_ROMANIZED_CONFIDENCE_FLOOR: f32 = 0.70;
    /// Pattern-fallback `pure_english` confidence.
    pub const FALLBACK_PURE_ENGLISH_CONFIDENCE: f32 = 0.75;
}

/// Smart Romanized Detector thresholds (§4.4).
pub mod romanized_detector {
    /// Minimum confidence to return a non-English label at all.
    pub const ACCEPTANCE_THRESHOLD: f32 = 0.30;
    /// If English wins by no more than this margin over the best Indic
    /// label, switch to the Indic label.
    pub const ENGLISH_TIEBREAK_MARGIN: f32 = 0.15;
    /// Signal weights: core-word match, n-gram membership, character
    /// frequency cosine similarity, phonetic regex.
    pub const WEIGHT_CORE_WORD: f32 = 0.65;
    pub const WEIGHT_NGRAM: f32 = 0.15;
    pub const WEIGHT_CHAR_FREQUENCY: f32 = 0.10;
    pub const WEIGHT_PHONETIC: f32 = 0.10;
    /// Per-language LID threshold (§4.3 step 4) before falling back to the
    /// LID model for other languages.
    pub const LID_FASTPATH_THRESHOLD: f32 = 0.25;
}

/// Fast-path language identification confidences (§4.3).
pub mod lid {
    /// Romanized Hindi/Bengali marker-word rule confidence.
    pub const ROMANIZED_MARKER_CONFIDENCE: f32 = 0.65;
    /// ASCII-only + English-indicator confidence.
    pub const ASCII_ENGLISH_CONFIDENCE: f32 = 0.95;
}

/// Spell corrector parameters (§4.2).
pub mod spell_correction {
    pub const DEFAULT_MAX_EDIT_DISTANCE: u8 = 2;
    pub const DEFAULT_PREFIX_LENGTH: u8 = 7;
}

/// Synonym Mapper parameters (§4.8).
pub mod synonyms {
    pub const DEFAULT_MAX_SYNONYMS: usize = 3;
}

/// Cache capacities (§3 "Caches").
pub mod caches {
    pub const PRODUCT_SCRAPE_FIFO: usize = 1_000;
    pub const SPELL_CORRECTION_LRU: usize = 10_000;
    pub const TOKENIZATION_LRU: usize = 2_000;
    pub const SCRIPT_TAG_LRU: usize = 1_000;
    pub const LANGUAGE_DETECTION_LRU: usize = 5_000;
    pub const LANGUAGE_DETECTOR_LRU: usize = 10_000;
    pub const ROMANIZED_DETECTION_LRU: usize = 3_000;
    pub const TRANSLITERATION_LRU: usize = 10_000;
    pub const EMBEDDING_LRU: usize = 5_000;
}

/// Network timeouts (§5: "3s timeouts with no retry").
pub mod timeouts {
    pub const URL_EXPANSION_MS: u64 = 3_000;
    pub const TRANSLITERATION_MS: u64 = 3_000;
    pub const SCRAPE_MS: u64 = 3_000;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_mix_thresholds_in_unit_range() {
        assert!((0.0..=1.0).contains(&code_mix::RULE_A_CONFIDENCE));
        assert!((0.0..=1.0).contains(&code_mix::RULE_B_LID_THRESHOLD));
        assert!((0.0..=1.0).contains(&code_mix::SMART_CHECKPOINT_ADOPTION_THRESHOLD));
    }

    #[test]
    fn romanized_detector_weights_sum_to_one() {
        let sum = romanized_detector::WEIGHT_CORE_WORD
            + romanized_detector::WEIGHT_NGRAM
            + romanized_detector::WEIGHT_CHAR_FREQUENCY
            + romanized_detector::WEIGHT_PHONETIC;
        assert!((sum - 1.0).abs() < 1e-6);
    }
}
