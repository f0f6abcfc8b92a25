//! Script-aware text processing stages of the query preprocessing
//! pipeline: spell correction, tokenization with script tagging and
//! language identification, romanized-language detection, code-mix
//! classification, and transliteration.

pub mod code_mix_classifier;
pub mod error;
pub mod markers;
pub mod romanized_detector;
pub mod spell_correction;
pub mod tokenizer;
pub mod transliteration_client;

pub use code_mix_classifier::EcommerceCodeMixClassifier;
pub use error::TextProcessingError;
pub use romanized_detector::SmartRomanizedDetector;
pub use spell_correction::EcommerceSpellCorrector;
pub use tokenizer::EcommerceTokenizer;
pub use transliteration_client::RemoteTransliterationClient;
