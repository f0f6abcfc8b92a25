//! Non-strict regex fallback tokenization, used only when the fast
//! pre-tokenizer cannot be constructed.

use once_cell::sync::Lazy;
use regex::Regex;

static FALLBACK_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\p{L}]+|\d+[\p{L}]+|\d+|[$₹৳€£]").unwrap()
});

pub fn regex_split(text: &str) -> Vec<String> {
    FALLBACK_PATTERN
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_words_numbers_and_currency() {
        let words = regex_split("shoes under ₹2000");
        assert_eq!(words, vec!["shoes", "under", "₹", "2000"]);
    }
}
