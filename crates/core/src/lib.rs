//! Core types and traits for the query preprocessing pipeline.
//!
//! This crate provides the foundational, domain-agnostic vocabulary shared
//! across every pipeline stage and crate in the workspace:
//! - The data model (`types`): tokens, language labels, script
//!   classification, the feature bag, and the embedding newtype.
//! - Pluggable-backend traits (`traits`) implemented by `qprep-text-processing`
//!   and `qprep-rag`, and consumed by `qprep-pipeline`'s orchestrator.
//! - Shared error variants (`error`).

pub mod error;
pub mod traits;
pub mod types;

pub use error::CoreError;
pub use traits::{
    CodeMixClassifier, Correction, Embedder, Product, ProductResolver, SearchFilter, SearchHit,
    SpellCorrector, SynonymSource, TokenizeResult, Tokenizer, TokenizerMethod,
    TransliterationClient, VectorSearch,
};
pub use types::{
    CategoryMethod, ClassificationMethod, Embedding, FeatureBag, LanguageLabel, ScriptClassLabel,
    ScriptClassification, ScriptTag, Token,
};
