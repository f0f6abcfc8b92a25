//! Transliteration Client (§4.6). Grounded on `transliteration.py` /
//! `transliteration_client.py`.

use std::num::NonZeroUsize;
use std::time::Duration;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use qprep_config::constants::caches;
use qprep_config::TransliterationConfig;
use qprep_core::{CoreError, TransliterationClient as TransliterationClientTrait};

/// English name / loose alias -> ISO 639-1 code, a normalization aid only;
/// the remote service's `GET /languages` response remains authoritative.
static LANGUAGE_NAME_TO_ISO: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("english", "en"),
        ("hindi", "hi"),
        ("bengali", "bn"),
        ("bangla", "bn"),
        ("marathi", "mr"),
        ("punjabi", "pa"),
        ("gujarati", "gu"),
        ("tamil", "ta"),
        ("telugu", "te"),
        ("kannada", "kn"),
        ("malayalam", "ml"),
        ("odia", "or"),
        ("oriya", "or"),
        ("assamese", "as"),
        ("sanskrit", "sa"),
        ("urdu", "ur"),
        ("nepali", "ne"),
        ("sindhi", "sd"),
        ("konkani", "kok"),
        ("kashmiri", "ks"),
        ("manipuri", "mni"),
    ])
});

fn resolve_language(target_language: &str) -> String {
    let lower = target_language.to_lowercase();
    LANGUAGE_NAME_TO_ISO
        .get(lower.as_str())
        .map(|code| code.to_string())
        .unwrap_or(lower)
}

#[derive(Debug, Deserialize)]
struct HealthResponse {
    #[serde(default)]
    model_loaded: bool,
}

#[derive(Debug, Serialize)]
struct TransliterateRequest<'a> {
    text: &'a str,
    target_language: &'a str,
    preserve_english: bool,
}

#[derive(Debug, Deserialize)]
struct TransliterateResponse {
    transliterated_text: String,
}

pub struct RemoteTransliterationClient {
    http: reqwest::Client,
    config: TransliterationConfig,
    available: RwLock<bool>,
    supported_languages: RwLock<Option<Vec<String>>>,
    cache: Mutex<lru::LruCache<(String, String, bool), String>>,
}

impl RemoteTransliterationClient {
    pub fn new(config: TransliterationConfig) -> Self {
        let http = reqwest::Client::builder()
            .pool_max_idle_per_host(20)
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .expect("reqwest client builder invariants satisfied by fixed configuration");

        Self {
            http,
            config,
            available: RwLock::new(false),
            supported_languages: RwLock::new(None),
            cache: Mutex::new(lru::LruCache::new(
                NonZeroUsize::new(caches::TRANSLITERATION_LRU).unwrap(),
            )),
        }
    }

    /// Probes `/health` and `/languages` once at startup. Failure here does
    /// not raise; it leaves the client unavailable, matching the Open
    /// Question decision that transliteration is a degradable dependency.
    pub async fn refresh_availability(&self) {
        let health_ok = match self.http.get(format!("{}/health", self.config.service_url)).send().await {
            Ok(resp) => match resp.json::<HealthResponse>().await {
                Ok(health) => health.model_loaded,
                Err(_) => false,
            },
            Err(err) => {
                tracing::warn!(error = %err, "transliteration service health probe failed");
                false
            }
        };
        *self.available.write() = health_ok;

        if health_ok {
            if let Ok(resp) = self.http.get(format!("{}/languages", self.config.service_url)).send().await {
                if let Ok(langs) = resp.json::<Vec<String>>().await {
                    *self.supported_languages.write() = Some(langs);
                }
            }
        }
    }

    fn is_supported(&self, iso_code: &str) -> bool {
        match &*self.supported_languages.read() {
            Some(langs) => langs.iter().any(|l| l == iso_code),
            None => true,
        }
    }
}

#[async_trait]
impl TransliterationClientTrait for RemoteTransliterationClient {
    fn is_available(&self) -> bool {
        *self.available.read()
    }

    async fn transliterate(&self, text: &str, source_language: &str, preserve_english: bool) -> Result<String, CoreError> {
        let target_iso = resolve_language(source_language);

        // Pass-through priority chain (§4.6).
        let is_romanized = source_language.ends_with("_Latn");
        let is_native = !is_romanized && source_language != "en" && !source_language.is_empty();
        if !is_romanized && !is_native {
            return Ok(text.to_string());
        }
        if target_iso == "en" {
            return Ok(text.to_string());
        }
        if !self.is_supported(&target_iso) {
            tracing::warn!(language = %target_iso, "transliteration target not supported by service, passing through");
            return Ok(text.to_string());
        }

        let key = (text.to_string(), target_iso.clone(), preserve_english);
        if let Some(cached) = self.cache.lock().get(&key) {
            return Ok(cached.clone());
        }

        if !self.is_available() {
            return self.on_failure(text);
        }

        let request = TransliterateRequest {
            text,
            target_language: &target_iso,
            preserve_english,
        };

        let result = self
            .http
            .post(format!("{}/transliterate", self.config.service_url))
            .json(&request)
            .send()
            .await;

        match result {
            Ok(resp) => match resp.json::<TransliterateResponse>().await {
                Ok(body) => {
                    self.cache.lock().put(key, body.transliterated_text.clone());
                    Ok(body.transliterated_text)
                }
                Err(err) => {
                    tracing::warn!(error = %err, "transliteration response decode failed");
                    self.on_failure(text)
                }
            },
            Err(err) => {
                tracing::warn!(error = %err, "transliteration request failed");
                self.on_failure(text)
            }
        }
    }

    async fn translate_to_english(&self, text: &str, source_language: &str) -> Result<String, CoreError> {
        if source_language == "en" || text.is_empty() {
            return Ok(text.to_string());
        }

        let key = (text.to_string(), "en".to_string(), false);
        if let Some(cached) = self.cache.lock().get(&key) {
            return Ok(cached.clone());
        }

        if !self.is_available() {
            return self.on_failure(text);
        }

        let request = TransliterateRequest {
            text,
            target_language: "en",
            preserve_english: false,
        };

        let result = self
            .http
            .post(format!("{}/translate", self.config.service_url))
            .json(&request)
            .send()
            .await;

        match result {
            Ok(resp) => match resp.json::<TransliterateResponse>().await {
                Ok(body) => {
                    self.cache.lock().put(key, body.transliterated_text.clone());
                    Ok(body.transliterated_text)
                }
                Err(err) => {
                    tracing::warn!(error = %err, "translation response decode failed");
                    self.on_failure(text)
                }
            },
            Err(err) => {
                tracing::warn!(error = %err, "translation request failed");
                self.on_failure(text)
            }
        }
    }
}

impl RemoteTransliterationClient {
    fn on_failure(&self, text: &str) -> Result<String, CoreError> {
        if self.config.pass_through_on_failure {
            Ok(text.to_string())
        } else {
            Err(CoreError::TransliterationUnavailable)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_language_names() {
        assert_eq!(resolve_language("Hindi"), "hi");
        assert_eq!(resolve_language("BANGLA"), "bn");
    }

    #[test]
    fn unknown_name_passes_through_lowercased() {
        assert_eq!(resolve_language("Klingon"), "klingon");
    }
}
