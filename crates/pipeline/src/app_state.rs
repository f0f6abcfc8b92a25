//! Singleton owner of every pipeline stage and cache (§3 Ownership &
//! Lifecycle): constructed once at startup, torn down at process exit, and
//! never mutated by any stage other than the orchestrator itself.

use std::sync::Arc;

use qprep_config::Settings;
use qprep_core::{CodeMixClassifier, Embedder, ProductResolver, SpellCorrector, Tokenizer, TransliterationClient, VectorSearch};
use qprep_rag::{HttpProductResolver, OnnxEmbedder, QdrantVectorSearch, SynonymMapper};
use qprep_text_processing::{EcommerceCodeMixClassifier, EcommerceSpellCorrector, EcommerceTokenizer, RemoteTransliterationClient};

use crate::error::PipelineError;
use crate::feature_extractor::FeatureExtractor;
use crate::input_adapter::InputAdapter;

/// All stage singletons, built once from `Settings` and shared behind
/// `Arc` by the orchestrator across every request.
pub struct AppState {
    pub input_adapter: InputAdapter,
    pub spell_corrector: Arc<dyn SpellCorrector>,
    pub tokenizer: Arc<dyn Tokenizer>,
    pub code_mix_classifier: Arc<dyn CodeMixClassifier>,
    pub transliteration_client: Arc<dyn TransliterationClient>,
    pub feature_extractor: FeatureExtractor,
    pub synonym_mapper: SynonymMapper,
    pub embedder: Arc<dyn Embedder>,
    pub vector_search: Arc<dyn VectorSearch>,
    pub product_resolver: Arc<dyn ProductResolver>,
}

impl AppState {
    pub fn build(settings: &Settings) -> Result<Self, PipelineError> {
        let pipeline = &settings.pipeline;

        let input_adapter = InputAdapter::new(pipeline.scrape_service_url.clone());
        let spell_corrector = Arc::new(EcommerceSpellCorrector::new(&pipeline.spell_correction));
        let tokenizer = Arc::new(EcommerceTokenizer::new());

        let mut code_mix_classifier = EcommerceCodeMixClassifier::new();
        #[cfg(feature = "onnx")]
        if let Some(path) = &pipeline.code_mix_classifier_path {
            code_mix_classifier = code_mix_classifier.with_model(std::path::Path::new(path));
        }
        let code_mix_classifier = Arc::new(code_mix_classifier);

        let transliteration_client = Arc::new(RemoteTransliterationClient::new(pipeline.transliteration.clone()));
        spawn_availability_refresh(Arc::clone(&transliteration_client));

        let feature_extractor = FeatureExtractor::new();
        let synonym_mapper = SynonymMapper::new();

        #[cfg(feature = "onnx")]
        let embedder: Arc<dyn Embedder> = match (&pipeline.embedding.model_path, &pipeline.embedding.tokenizer_path)
        {
            (Some(model_path), Some(tokenizer_path)) => Arc::new(OnnxEmbedder::load(
                std::path::Path::new(model_path),
                std::path::Path::new(tokenizer_path),
                pipeline.embedding.dim,
            )?),
            _ => {
                tracing::warn!("embedding model not configured; falling back to zero-vector stub");
                Arc::new(OnnxEmbedder::stub(pipeline.embedding.dim))
            }
        };
        #[cfg(not(feature = "onnx"))]
        let embedder: Arc<dyn Embedder> = Arc::new(OnnxEmbedder::stub(pipeline.embedding.dim));

        let vector_search: Arc<dyn VectorSearch> = Arc::new(QdrantVectorSearch::connect(
            &pipeline.vector_index,
            &pipeline.vector_index.endpoint,
        )?);

        let product_resolver: Arc<dyn ProductResolver> =
            Arc::new(HttpProductResolver::new(pipeline.product_resolver_url.clone()));

        Ok(Self {
            input_adapter,
            spell_corrector,
            tokenizer,
            code_mix_classifier,
            transliteration_client,
            feature_extractor,
            synonym_mapper,
            embedder,
            vector_search,
            product_resolver,
        })
    }
}

/// Runs the transliteration client's startup health probe on the current
/// Tokio runtime, if one is entered. `available` starts `false` and the
/// probe is the only thing that ever flips it, so skipping this would leave
/// every non-English query failing with `TransliterationUnavailable`.
fn spawn_availability_refresh(client: Arc<RemoteTransliterationClient>) {
    match tokio::runtime::Handle::try_current() {
        Ok(handle) => {
            handle.spawn(async move { client.refresh_availability().await });
        }
        Err(_) => {
            tracing::debug!("no Tokio runtime entered; skipping transliteration availability probe");
        }
    }
}
