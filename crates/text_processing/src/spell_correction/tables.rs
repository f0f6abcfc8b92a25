//! Static correction data, carried over verbatim from the curated
//! e-commerce rewrite/unit tables. Representative seed entries, not
//! exhaustive — a production deployment extends these from query logs.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

/// Misspelling -> correct spelling, looked up by dictionary, not regex.
pub static REWRITE_TABLE: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("iphon", "iphone"),
        ("sumsung", "samsung"),
        ("onplus", "oneplus"),
        ("headphon", "headphone"),
        ("earphon", "earphone"),
        ("bluetoth", "bluetooth"),
        ("wireles", "wireless"),
        ("laptap", "laptop"),
        ("mobil", "mobile"),
        ("chargr", "charger"),
        ("takar", "taka"),
        ("rupaye", "rupees"),
        ("undr", "under"),
        ("prise", "price"),
        ("qualty", "quality"),
        ("smartwach", "smartwatch"),
    ])
});

/// Currency/quantity alias -> canonical form, applied when
/// `apply_unit_normalization` is set.
pub static UNIT_TABLE: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("taka", "rupees"),
        ("টাকা", "rupees"),
        ("rupaye", "rupees"),
        ("rupya", "rupees"),
        ("rs", "rupees"),
        ("inr", "rupees"),
        ("₹", "rupees"),
        ("pcs", "pieces"),
        ("pc", "pieces"),
        ("kg", "kilogram"),
        ("gm", "gram"),
        ("ltr", "liter"),
        ("ml", "milliliter"),
    ])
});

/// Tokens matching any of these patterns pass through uncorrected: pure
/// numbers, number+unit-suffix shapes, model-code shapes.
pub static PRESERVE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"^\d+$").unwrap(),
        Regex::new(r"^\d+[kmbt]$").unwrap(),
        Regex::new(r"^\d+(gb|tb|mb)$").unwrap(),
        Regex::new(r"^\d+(mah|wh)$").unwrap(),
        Regex::new(r"^\d+(mp|mpx)$").unwrap(),
        Regex::new(r"^[a-z]\d+$").unwrap(),
        Regex::new(r"^\d+[a-z]$").unwrap(),
    ]
});

pub fn should_preserve(token: &str) -> bool {
    let lower = token.to_lowercase();
    lower.len() < 3 || PRESERVE_PATTERNS.iter().any(|p| p.is_match(&lower))
}

/// Fallback e-commerce dictionary built in-process when no custom
/// dictionary path is configured: brand/category/spec/price-term frequency
/// pairs, matching `_load_ecommerce_terms`.
pub static FALLBACK_DICTIONARY: Lazy<Vec<(&'static str, u64)>> = Lazy::new(|| {
    vec![
        ("iphone", 1_000_000),
        ("samsung", 1_000_000),
        ("oneplus", 800_000),
        ("realme", 700_000),
        ("xiaomi", 700_000),
        ("poco", 500_000),
        ("headphone", 600_000),
        ("earphone", 500_000),
        ("bluetooth", 800_000),
        ("wireless", 800_000),
        ("laptop", 900_000),
        ("mobile", 900_000),
        ("charger", 400_000),
        ("smartwatch", 400_000),
        ("rupees", 1_000_000),
        ("under", 900_000),
        ("price", 900_000),
        ("quality", 500_000),
        ("storage", 500_000),
        ("battery", 500_000),
        ("camera", 600_000),
        ("processor", 300_000),
        ("display", 400_000),
        ("screen", 400_000),
    ]
});
