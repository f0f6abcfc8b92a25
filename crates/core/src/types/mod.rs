//! Shared data-model types, one item per file per the donor's
//! `core/src/traits/` convention.

mod embedding;
mod feature_bag;
mod language_label;
mod script_classification;
mod script_tag;
mod token;

pub use embedding::Embedding;
pub use feature_bag::{CategoryMethod, FeatureBag};
pub use language_label::LanguageLabel;
pub use script_classification::{ClassificationMethod, ScriptClassLabel, ScriptClassification};
pub use script_tag::ScriptTag;
pub use token::Token;
