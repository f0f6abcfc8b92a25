use async_trait::async_trait;

/// Pluggable transliteration backend.
#[async_trait]
pub trait TransliterationClient: Send + Sync {
    /// Transliterate `text` (believed to be romanized `source_language`)
    /// into the native script of `source_language`. Implementations must
    /// pass text through unchanged rather than error on any of the
    /// documented pass-through conditions (§4.6).
    async fn transliterate(
        &self,
        text: &str,
        source_language: &str,
        preserve_english: bool,
    ) -> Result<String, crate::error::CoreError>;

    /// Whether the backing service reported `model_loaded` on its last
    /// health check.
    fn is_available(&self) -> bool;

    /// Translates `text` (in `source_language`) to English for downstream
    /// embedding, served by the same remote linguistic service as
    /// `transliterate` (§4.10 step 5's "translate toward English").
    async fn translate_to_english(&self, text: &str, source_language: &str) -> Result<String, crate::error::CoreError>;
}
