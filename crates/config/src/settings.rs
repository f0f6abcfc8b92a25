//! Main settings module

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::constants::spell_correction;
use crate::ConfigError;

/// Runtime environment enum. Gates whether a missing hard dependency is a
/// startup error (production/staging) or a warning (development).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeEnvironment {
    #[default]
    Development,
    Staging,
    Production,
}

impl RuntimeEnvironment {
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    pub fn is_strict(&self) -> bool {
        matches!(self, Self::Production | Self::Staging)
    }
}

/// Top-level application settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub environment: RuntimeEnvironment,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub pipeline: PipelineSettings,

    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_pipeline()?;
        self.validate_server()?;
        Ok(())
    }

    fn validate_pipeline(&self) -> Result<(), ConfigError> {
        let sc = &self.pipeline.spell_correction;
        if sc.max_edit_distance == 0 {
            return Err(ConfigError::InvalidValue {
                field: "pipeline.spell_correction.max_edit_distance".to_string(),
                message: "must be at least 1".to_string(),
            });
        }

        if self.environment.is_strict() {
            if self.pipeline.lid_model_path.trim().is_empty() {
                return Err(ConfigError::MissingField(
                    "pipeline.lid_model_path".to_string(),
                ));
            }
            if self.pipeline.transliteration.service_url.trim().is_empty() {
                return Err(ConfigError::MissingField(
                    "pipeline.transliteration.service_url".to_string(),
                ));
            }
        } else {
            if self.pipeline.lid_model_path.trim().is_empty() {
                tracing::warn!("pipeline.lid_model_path not configured (required for production)");
            }
            if self.pipeline.transliteration.service_url.trim().is_empty() {
                tracing::warn!(
                    "pipeline.transliteration.service_url not configured (required for production)"
                );
            }
        }

        Ok(())
    }

    fn validate_server(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                message: "port cannot be 0".to_string(),
            });
        }

        if self.environment.is_production() && self.server.cors_enabled && self.server.cors_origins.is_empty() {
            tracing::warn!(
                "CORS is enabled in production but no origins are configured; this may block legitimate requests"
            );
        }

        Ok(())
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_true")]
    pub cors_enabled: bool,
    #[serde(default)]
    pub cors_origins: Vec<String>,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_request_timeout_secs() -> u64 {
    10
}
fn default_true() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_enabled: default_true(),
            cors_origins: Vec::new(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

/// Spell correction parameters (§6.5).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpellCorrectionConfig {
    #[serde(default = "default_max_edit_distance")]
    pub max_edit_distance: u8,
    #[serde(default = "default_prefix_length")]
    pub prefix_length: u8,
    #[serde(default)]
    pub dictionary_path: Option<String>,
}

fn default_max_edit_distance() -> u8 {
    spell_correction::DEFAULT_MAX_EDIT_DISTANCE
}
fn default_prefix_length() -> u8 {
    spell_correction::DEFAULT_PREFIX_LENGTH
}

impl Default for SpellCorrectionConfig {
    fn default() -> Self {
        Self {
            max_edit_distance: default_max_edit_distance(),
            prefix_length: default_prefix_length(),
            dictionary_path: None,
        }
    }
}

/// Transliteration service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransliterationConfig {
    #[serde(default)]
    pub service_url: String,
    #[serde(default = "default_transliteration_timeout_ms")]
    pub timeout_ms: u64,
    /// When the transliteration service is unreachable: pass the romanized
    /// text through unchanged instead of raising (§9 Open Question (b)).
    #[serde(default)]
    pub pass_through_on_failure: bool,
}

fn default_transliteration_timeout_ms() -> u64 {
    3_000
}

impl Default for TransliterationConfig {
    fn default() -> Self {
        Self {
            service_url: String::new(),
            timeout_ms: default_transliteration_timeout_ms(),
            pass_through_on_failure: false,
        }
    }
}

/// Vector index connection configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VectorIndexConfig {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    /// Qdrant gRPC/HTTP endpoint, e.g. `http://localhost:6334`.
    #[serde(default)]
    pub endpoint: String,
}

/// Embedding model configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    #[serde(default)]
    pub model_id: String,
    #[serde(default = "default_device")]
    pub device: String,
    /// Path to the ONNX sentence-embedding model. Absence degrades to a
    /// zero-vector stub (no onnx feature / no model configured).
    #[serde(default)]
    pub model_path: Option<String>,
    #[serde(default)]
    pub tokenizer_path: Option<String>,
    /// Dimension of the loaded model's output, bound at startup.
    #[serde(default = "default_embedding_dim")]
    pub dim: usize,
}

fn default_embedding_dim() -> usize {
    384
}

fn default_device() -> String {
    "cpu".to_string()
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            model_id: String::new(),
            device: default_device(),
            model_path: None,
            tokenizer_path: None,
            dim: default_embedding_dim(),
        }
    }
}

/// Pipeline-wide configuration (§6.5).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineSettings {
    #[serde(default)]
    pub lid_model_path: String,
    #[serde(default)]
    pub code_mix_classifier_path: Option<String>,
    #[serde(default)]
    pub spell_correction: SpellCorrectionConfig,
    #[serde(default)]
    pub transliteration: TransliterationConfig,
    #[serde(default)]
    pub vector_index: VectorIndexConfig,
    #[serde(default)]
    pub embedding: EmbeddingConfig,
    /// Base URL of the product-resolution collaborator (§4.10 step 11).
    #[serde(default)]
    pub product_resolver_url: String,
    /// Base URL of the product-scraping collaborator (§4.1). Absence
    /// degrades URL-type input to the expanded URL text.
    #[serde(default)]
    pub scrape_service_url: Option<String>,
}

/// Observability configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_json: bool,
    #[serde(default)]
    pub otlp_endpoint: Option<String>,
    #[serde(default = "default_true")]
    pub metrics_enabled: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: false,
            otlp_endpoint: None,
            metrics_enabled: true,
        }
    }
}

/// Load settings from files and environment.
///
/// Priority (highest to lowest):
/// 1. Environment variables (`QPREP__` prefix, `__` separator)
/// 2. `config/{env}.toml` (if env specified)
/// 3. `config/default.toml`
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    builder = builder.add_source(File::with_name("config/default").required(false));

    if let Some(env_name) = env {
        builder =
            builder.add_source(File::with_name(&format!("config/{}", env_name)).required(false));
    }

    builder = builder.add_source(
        Environment::with_prefix("QPREP")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;
    let settings: Settings = config.try_deserialize()?;

    settings.validate()?;

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.server.port, 8080);
        assert_eq!(
            settings.pipeline.spell_correction.max_edit_distance,
            spell_correction::DEFAULT_MAX_EDIT_DISTANCE
        );
    }

    #[test]
    fn test_strict_mode_requires_lid_model_path() {
        let mut settings = Settings::default();
        settings.environment = RuntimeEnvironment::Production;
        assert!(settings.validate().is_err());

        settings.pipeline.lid_model_path = "models/lid.bin".to_string();
        settings.pipeline.transliteration.service_url = "http://translit:9000".to_string();
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_development_mode_tolerates_missing_paths() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_port_validation() {
        let mut settings = Settings::default();
        settings.server.port = 0;
        assert!(settings.validate_server().is_err());
    }
}
