//! Configuration management for the query preprocessing pipeline.
//!
//! Supports loading configuration from:
//! - TOML files (`config/default.toml`, `config/{env}.toml`)
//! - Environment variables (`QPREP__` prefix, `__` separator)
//!
//! `RuntimeEnvironment::is_strict()` gates whether a missing hard
//! dependency (LID model, transliteration service URL) is a startup error
//! (production/staging) or a warning (development), per §7's "hard
//! dependency missing at startup" vs "degradable" split.

pub mod constants;
pub mod settings;

pub use settings::{
    load_settings, EmbeddingConfig, ObservabilityConfig, PipelineSettings, RuntimeEnvironment,
    ServerConfig, Settings, SpellCorrectionConfig, TransliterationConfig, VectorIndexConfig,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Environment error: {0}")]
    Environment(String),
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
