//! Per-token script tagging: a first-character fast path, falling back to
//! a per-character dominant-block vote for mixed tokens. Also provides the
//! final Unicode-ratio-based language fallback (§4.3 step 5).

use qprep_core::ScriptTag;

/// Classifies a token's dominant script. Fast path looks only at the first
/// character; tokens whose first character maps to `Other` fall back to a
/// full per-character vote, with `Number` as the tie-breaker.
pub fn classify_token(token: &str) -> ScriptTag {
    let mut chars = token.chars();
    let first = match chars.next() {
        Some(c) => c,
        None => return ScriptTag::Other,
    };

    let fast = ScriptTag::of_char(first);
    if fast != ScriptTag::Other {
        return fast;
    }

    dominant_block(token)
}

fn dominant_block(token: &str) -> ScriptTag {
    use std::collections::HashMap;

    let mut counts: HashMap<ScriptTag, usize> = HashMap::new();
    for c in token.chars() {
        *counts.entry(ScriptTag::of_char(c)).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .filter(|(tag, _)| !matches!(tag, ScriptTag::Space | ScriptTag::Other))
        .max_by_key(|(tag, count)| (*count, *tag == ScriptTag::Number))
        .map(|(tag, _)| tag)
        .unwrap_or(ScriptTag::Other)
}

/// Final fallback when neither fast-path rules nor the Smart Romanized
/// Detector produce a confident language, based on which script dominates
/// the query (§4.3 step 5).
pub fn unicode_ratio_fallback(text: &str) -> (String, f32) {
    let total = text.chars().filter(|c| !c.is_whitespace()).count().max(1);
    let mut counts = std::collections::HashMap::new();
    for c in text.chars() {
        if c.is_whitespace() {
            continue;
        }
        *counts.entry(ScriptTag::of_char(c)).or_insert(0usize) += 1;
    }

    let (dominant, count) = counts
        .into_iter()
        .max_by_key(|(_, count)| *count)
        .unwrap_or((ScriptTag::Latin, total));

    let ratio = count as f32 / total as f32;
    let code = match dominant {
        ScriptTag::Devanagari => "hi",
        ScriptTag::Bengali => "bn",
        ScriptTag::Tamil => "ta",
        ScriptTag::Telugu => "te",
        ScriptTag::Gujarati => "gu",
        ScriptTag::Kannada => "kn",
        ScriptTag::Malayalam => "ml",
        ScriptTag::Punjabi => "pa",
        ScriptTag::Odia => "or",
        ScriptTag::Arabic => "ar",
        _ => "en",
    };

    (code.to_string(), ratio.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_token_tags_latin() {
        assert_eq!(classify_token("hello"), ScriptTag::Latin);
    }

    #[test]
    fn pure_number_tags_number() {
        assert_eq!(classify_token("2000"), ScriptTag::Number);
    }

    #[test]
    fn devanagari_token_tags_devanagari() {
        assert_eq!(classify_token("नमस्ते"), ScriptTag::Devanagari);
    }

    #[test]
    fn mixed_token_picks_dominant_non_number_block() {
        assert_eq!(classify_token("नमस्ते5"), ScriptTag::Devanagari);
    }

    #[test]
    fn unicode_ratio_fallback_detects_devanagari_dominance() {
        let (code, ratio) = unicode_ratio_fallback("नमस्ते दुनिया");
        assert_eq!(code, "hi");
        assert!(ratio > 0.9);
    }
}
