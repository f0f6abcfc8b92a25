//! Synonym Mapper (§4.8). Grounded on `synonym_mapper.py`.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use once_cell::sync::Lazy;
use qprep_config::constants::synonyms;
use qprep_core::SynonymSource;

/// Curated, bidirectional e-commerce synonym groups. Each inner slice is
/// one equivalence class; every member maps to every other member.
static ECOMMERCE_SYNONYMS: Lazy<Vec<Vec<&'static str>>> = Lazy::new(|| {
    vec![
        vec!["mobile", "phone", "smartphone", "handset"],
        vec!["laptop", "notebook", "computer"],
        vec!["tablet", "ipad", "tab"],
        vec!["tv", "television"],
        vec!["wireless", "bluetooth", "wifi", "cordless"],
        vec!["wired", "cable", "corded"],
        vec!["touchscreen", "touch screen"],
        vec!["storage", "memory", "space", "capacity"],
        vec!["ssd", "solid state"],
        vec!["hdd", "hard disk"],
        vec!["display", "screen", "monitor"],
        vec!["amoled", "oled"],
        vec!["lcd", "led", "ips"],
        vec!["camera", "cam", "lens"],
        vec!["megapixel", "mp"],
        vec!["selfie", "front camera"],
        vec!["battery", "mah", "power", "backup"],
        vec!["charger", "adapter"],
        vec!["fast charging", "quick charge"],
        vec!["headphone", "headset", "earphone", "earbuds"],
        vec!["speaker", "audio", "sound"],
        vec!["cheap", "budget", "affordable"],
        vec!["expensive", "premium"],
        vec!["best", "top"],
        vec!["good", "decent"],
        vec!["new", "latest"],
        vec!["oneplus", "one plus", "1+"],
        vec!["realme", "real me"],
        vec!["poco", "pocophone"],
        vec!["lakh", "100000"],
        vec!["offer", "deal", "discount"],
        vec!["flipkart", "fk"],
        vec!["amazon", "amzn"],
    ]
});

static SYNONYM_INDEX: Lazy<HashMap<&'static str, &'static Vec<&'static str>>> = Lazy::new(|| {
    let mut index = HashMap::new();
    for group in ECOMMERCE_SYNONYMS.iter() {
        for term in group {
            index.insert(*term, group);
        }
    }
    index
});

/// Expands query terms using the curated dictionary, with an optional
/// pluggable fallback (e.g. a WordNet-backed source) for terms the curated
/// dictionary doesn't cover.
pub struct SynonymMapper {
    fallback: Option<Arc<dyn SynonymSource>>,
    max_synonyms: usize,
}

impl SynonymMapper {
    pub fn new() -> Self {
        Self {
            fallback: None,
            max_synonyms: synonyms::DEFAULT_MAX_SYNONYMS,
        }
    }

    pub fn with_fallback(mut self, fallback: Arc<dyn SynonymSource>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    pub fn with_max_synonyms(mut self, max_synonyms: usize) -> Self {
        self.max_synonyms = max_synonyms;
        self
    }

    /// Returns up to `max_synonyms` deduplicated synonym terms for `text`,
    /// excluding terms already present in `text`.
    pub fn expand(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        let present: HashSet<&str> = lower.split_whitespace().collect();

        let mut seen: HashSet<String> = HashSet::new();
        let mut expansions = Vec::new();

        for word in lower.split_whitespace() {
            if let Some(group) = SYNONYM_INDEX.get(word) {
                for candidate in group.iter() {
                    if *candidate == word || present.contains(candidate) {
                        continue;
                    }
                    if seen.insert(candidate.to_string()) {
                        expansions.push(candidate.to_string());
                    }
                    if expansions.len() >= self.max_synonyms {
                        return expansions;
                    }
                }
            } else if let Some(fallback) = &self.fallback {
                for candidate in fallback.synonyms_for(word) {
                    if present.contains(candidate.as_str()) {
                        continue;
                    }
                    if seen.insert(candidate.clone()) {
                        expansions.push(candidate);
                    }
                    if expansions.len() >= self.max_synonyms {
                        return expansions;
                    }
                }
            }
        }

        expansions
    }
}

impl Default for SynonymMapper {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_curated_terms() {
        let mapper = SynonymMapper::new();
        let expansions = mapper.expand("best mobile");
        assert!(expansions.contains(&"top".to_string()));
        assert!(expansions.iter().any(|e| ["phone", "smartphone", "handset"].contains(&e.as_str())));
    }

    #[test]
    fn caps_at_max_synonyms() {
        let mapper = SynonymMapper::new().with_max_synonyms(1);
        let expansions = mapper.expand("best mobile wireless");
        assert_eq!(expansions.len(), 1);
    }

    #[test]
    fn excludes_terms_already_present() {
        let mapper = SynonymMapper::new();
        let expansions = mapper.expand("cheap budget phone");
        assert!(!expansions.contains(&"budget".to_string()));
    }

    #[test]
    fn unknown_terms_without_fallback_produce_nothing() {
        let mapper = SynonymMapper::new();
        assert!(mapper.expand("xyzzy").is_empty());
    }
}
