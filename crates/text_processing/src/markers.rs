//! Static marker-word and n-gram data shared by the fast-path language
//! identifier (§4.3) and the Smart Romanized Detector (§4.4), transcribed
//! from `tokenizer.py` / `smart_romanized_detector.py` as Rust statics,
//! matching the donor crate's `Lazy<String>` static-constant idiom.

use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};

/// Romanized Hindi marker words for the tokenizer's rule-based fast path
/// (`hindi_words` in `tokenizer.py`).
pub static HINDI_MARKERS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "mujhe", "chahiye", "dikhao", "dikhaiye", "dikhaye", "karo", "kariye", "ka", "ki", "ke",
        "ko", "hai", "ho", "hain", "tha", "thi", "the", "kya", "kaun", "kaise", "kahan", "dekho",
        "dekhiye", "lena", "lijiye", "dena", "dijiye", "hua", "hoon", "tumhara", "tumhe",
        "aapka", "aapko", "na", "nahi", "nahin", "haan", "toh", "wala", "wali", "mere", "mera",
    ])
});

/// Romanized Bengali marker words for the tokenizer's rule-based fast path
/// (`bengali_words` in `tokenizer.py`).
pub static BENGALI_MARKERS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "amake", "amar", "tomar", "dekhao", "dekhaye", "koro", "korte", "koriye", "hobe", "ache",
        "achhe", "niye", "dao", "diye", "kemon", "kothay", "kon", "tumi", "ami", "apni", "eta",
        "ota", "ki", "na", "haan", "chilo", "chhilo",
    ])
});

/// Core Hindi vocabulary used by the Smart Romanized Detector's weighted
/// core-word signal (`core_hindi_words` in `smart_romanized_detector.py`).
pub static CORE_HINDI_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "ka", "ke", "ki", "ko", "se", "me", "mein", "par", "tak", "hai", "hain", "chahiye",
        "kharidna", "khareedna", "dekhna", "milega", "lagta", "dena", "lena", "aur", "ya", "kya",
        "koi", "yah", "woh", "ek", "do", "mujhe", "mere", "mera", "tumhe", "tumhara", "rupay",
        "rupaye", "rupaiye", "taka", "paisa", "sasta", "mehenga", "accha", "badhiya", "best",
        "under", "upor", "upar", "niche", "andar",
    ])
});

/// Core Bengali vocabulary used by the Smart Romanized Detector's weighted
/// core-word signal (`core_bengali_words` in `smart_romanized_detector.py`).
pub static CORE_BENGALI_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "ar", "er", "te", "ke", "ba", "o", "ebong", "ache", "achhe", "dekhao", "dekhabo", "keno",
        "kena", "lagbe", "hobe", "debo", "nebo", "amake", "amar", "tomar", "take", "tar", "ei",
        "oi", "koto", "ki", "ekta", "duti", "taka", "dam", "damer", "bhalo", "sundor", "upor",
        "upore", "niche", "moddhe", "vitore", "under",
    ])
});

/// English-indicator words used by the Fast Lane's pure-English short
/// circuit (§4.3 step 2, §4.5 Rule B pattern fallback).
pub static ENGLISH_MARKERS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "the", "is", "are", "with", "for", "under", "best", "show", "me", "price", "buy",
        "new", "and", "of", "in",
    ])
});

/// Whitelist of Indic languages the Smart Romanized Detector is allowed to
/// return (§4.3 step 4).
pub static ROMANIZED_LANGUAGE_WHITELIST: Lazy<HashSet<&'static str>> =
    Lazy::new(|| HashSet::from(["hi", "bn", "mr", "pa", "gu", "ta", "te"]));

/// Per-language character-frequency tables (hand-tuned), used by the Smart
/// Romanized Detector's cosine-similarity signal.
pub static CHAR_FREQUENCY_HI: Lazy<HashMap<char, f32>> = Lazy::new(|| {
    HashMap::from([
        ('a', 0.14), ('i', 0.09), ('e', 0.07), ('h', 0.06), ('k', 0.06), ('n', 0.07),
        ('r', 0.06), ('t', 0.06), ('s', 0.05), ('m', 0.05), ('u', 0.05), ('o', 0.04),
    ])
});
pub static CHAR_FREQUENCY_BN: Lazy<HashMap<char, f32>> = Lazy::new(|| {
    HashMap::from([
        ('a', 0.13), ('e', 0.10), ('o', 0.08), ('r', 0.06), ('h', 0.05), ('k', 0.05),
        ('n', 0.06), ('t', 0.06), ('i', 0.07), ('b', 0.04), ('c', 0.03), ('j', 0.03),
    ])
});
pub static CHAR_FREQUENCY_EN: Lazy<HashMap<char, f32>> = Lazy::new(|| {
    HashMap::from([
        ('e', 0.127), ('t', 0.091), ('a', 0.082), ('o', 0.075), ('i', 0.070), ('n', 0.067),
        ('s', 0.063), ('h', 0.061), ('r', 0.060), ('d', 0.043), ('l', 0.040), ('c', 0.028),
    ])
});

/// Bigram/trigram membership sets per language.
pub static NGRAMS_HI: Lazy<HashSet<&'static str>> =
    Lazy::new(|| HashSet::from(["kya", "hai", "nahi", "kar", "aap", "tum", "aur", "liye"]));
pub static NGRAMS_BN: Lazy<HashSet<&'static str>> =
    Lazy::new(|| HashSet::from(["ache", "nei", "tumi", "ami", "bhalo", "kemon"]));
