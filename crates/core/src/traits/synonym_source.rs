use std::collections::HashSet;

/// Optional enrichment source for the Synonym Mapper (spec.md §4.8's
/// WordNet fallback), pluggable the way the donor crate makes LLM backends
/// pluggable. A deployment without one still gets the curated dictionary.
pub trait SynonymSource: Send + Sync {
    fn synonyms_for(&self, word: &str) -> HashSet<String>;
}
