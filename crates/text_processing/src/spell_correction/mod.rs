//! Spell Corrector (§4.2): curated rewrite table, then SymSpell-style
//! symmetric-delete lookup, then unit/currency normalization. Grounded on
//! `spell_corrector.py`.

mod tables;

use async_trait::async_trait;
use parking_lot::Mutex;
use symspell::{SymSpell, SymSpellBuilder, UnicodeStringStrategy, Verbosity};

use qprep_config::SpellCorrectionConfig;
use qprep_core::{Correction, SpellCorrector};

use self::tables::{should_preserve, FALLBACK_DICTIONARY, REWRITE_TABLE, UNIT_TABLE};

pub struct EcommerceSpellCorrector {
    symspell: SymSpell<UnicodeStringStrategy>,
    max_edit_distance: i64,
    cache: Mutex<lru::LruCache<(String, bool), (String, Vec<Correction>)>>,
}

impl EcommerceSpellCorrector {
    pub fn new(config: &SpellCorrectionConfig) -> Self {
        let mut symspell: SymSpell<UnicodeStringStrategy> = SymSpellBuilder::default()
            .max_dictionary_edit_distance(config.max_edit_distance as i64)
            .prefix_length(config.prefix_length as i64)
            .build()
            .expect("symspell builder invariants satisfied by validated config");

        match &config.dictionary_path {
            Some(path) => {
                if symspell.load_dictionary(path, 0, 1, " ") {
                    tracing::info!(path = %path, "loaded spell-correction dictionary");
                } else {
                    tracing::warn!(path = %path, "failed to load spell-correction dictionary, using fallback terms");
                    load_fallback(&mut symspell);
                }
            }
            None => load_fallback(&mut symspell),
        }

        Self {
            symspell,
            max_edit_distance: config.max_edit_distance as i64,
            cache: Mutex::new(lru::LruCache::new(
                std::num::NonZeroUsize::new(qprep_config::constants::caches::SPELL_CORRECTION_LRU)
                    .unwrap(),
            )),
        }
    }

    fn correct_sync(&self, text: &str, apply_unit_normalization: bool) -> (String, Vec<Correction>) {
        if text.is_empty() {
            return (String::new(), Vec::new());
        }

        let key = (text.to_string(), apply_unit_normalization);
        if let Some(cached) = self.cache.lock().get(&key) {
            return cached.clone();
        }

        let mut corrections = Vec::new();
        let corrected_words: Vec<String> = text
            .split_whitespace()
            .map(|word| self.correct_word(word, &mut corrections))
            .collect();

        let mut corrected = corrected_words.join(" ");

        if apply_unit_normalization {
            corrected = corrected
                .split_whitespace()
                .map(|w| {
                    UNIT_TABLE
                        .get(w.to_lowercase().as_str())
                        .copied()
                        .unwrap_or(w)
                        .to_string()
                })
                .collect::<Vec<_>>()
                .join(" ");
        }

        let result = (corrected, corrections);
        self.cache.lock().put(key, result.clone());
        result
    }

    fn correct_word(&self, word: &str, corrections: &mut Vec<Correction>) -> String {
        let lower = word.to_lowercase();

        if let Some(&rewritten) = REWRITE_TABLE.get(lower.as_str()) {
            corrections.push(Correction {
                original: word.to_string(),
                corrected: rewritten.to_string(),
            });
            return rewritten.to_string();
        }

        if should_preserve(&lower) {
            return word.to_string();
        }

        let suggestions = self.symspell.lookup(&lower, Verbosity::Closest, self.max_edit_distance);
        if let Some(best) = suggestions.first() {
            if best.distance <= self.max_edit_distance && best.term != lower {
                corrections.push(Correction {
                    original: word.to_string(),
                    corrected: best.term.clone(),
                });
                return best.term.clone();
            }
        }

        word.to_string()
    }
}

fn load_fallback(symspell: &mut SymSpell<UnicodeStringStrategy>) {
    for (term, count) in FALLBACK_DICTIONARY.iter() {
        symspell.load_dictionary_line(&format!("{term},{count}"), 0, 1, ",");
    }
}

#[async_trait]
impl SpellCorrector for EcommerceSpellCorrector {
    async fn correct(&self, text: &str, apply_unit_normalization: bool) -> (String, Vec<Correction>) {
        self.correct_sync(text, apply_unit_normalization)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corrector() -> EcommerceSpellCorrector {
        EcommerceSpellCorrector::new(&SpellCorrectionConfig::default())
    }

    #[tokio::test]
    async fn rewrite_table_takes_priority() {
        let c = corrector();
        let (out, corrections) = c.correct("iphon chargr", true).await;
        assert_eq!(out, "iphone charger");
        assert_eq!(corrections.len(), 2);
    }

    #[tokio::test]
    async fn preserve_patterns_pass_through() {
        let c = corrector();
        let (out, corrections) = c.correct("128gb a52 5000mah", true).await;
        assert_eq!(out, "128gb a52 5000mah");
        assert!(corrections.is_empty());
    }

    #[tokio::test]
    async fn unit_normalization_applies_after_correction() {
        let c = corrector();
        let (out, _) = c.correct("500 taka", true).await;
        assert_eq!(out, "500 rupees");
    }

    #[tokio::test]
    async fn unit_normalization_skipped_when_disabled() {
        let c = corrector();
        let (out, _) = c.correct("500 taka", false).await;
        assert_eq!(out, "500 taka");
    }

    #[tokio::test]
    async fn empty_input_passes_through() {
        let c = corrector();
        let (out, corrections) = c.correct("", true).await;
        assert_eq!(out, "");
        assert!(corrections.is_empty());
    }
}
