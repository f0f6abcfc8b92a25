//! HTTP endpoints: `POST /query`, `GET /health`, `GET /metrics` (§6.6).

use axum::{
    extract::State,
    http::{HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use qprep_core::FeatureBag;
use qprep_pipeline::{PipelineMetrics, PipelineResult};

use crate::state::AppState;
use crate::ServerError;

/// Build the application router: pipeline routes, CORS, and tracing.
pub fn create_router(state: AppState, metrics_handle: PrometheusHandle) -> Router {
    let cors_layer = build_cors_layer(&state.settings.server.cors_origins, state.settings.server.cors_enabled);

    Router::new()
        .route("/query", post(query))
        .route("/health", get(health_check))
        .route("/metrics", get(move || metrics_endpoint(metrics_handle.clone())))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(state)
}

/// Build CORS layer from configured origins; defaults to localhost:3000
/// when no origins are configured, falls back to permissive when disabled.
fn build_cors_layer(origins: &[String], enabled: bool) -> CorsLayer {
    if !enabled {
        tracing::warn!("CORS is disabled - allowing all origins (not for production)");
        return CorsLayer::permissive();
    }

    if origins.is_empty() {
        tracing::info!("no CORS origins configured, defaulting to localhost:3000");
        return CorsLayer::new()
            .allow_origin("http://localhost:3000".parse::<HeaderValue>().unwrap())
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any);
    }

    let parsed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| {
            origin.parse::<HeaderValue>().ok().or_else(|| {
                tracing::warn!(origin = %origin, "invalid CORS origin");
                None
            })
        })
        .collect();

    if parsed_origins.is_empty() {
        tracing::error!("all configured CORS origins are invalid, falling back to localhost");
        return CorsLayer::new()
            .allow_origin("http://localhost:3000".parse::<HeaderValue>().unwrap())
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any);
    }

    CorsLayer::new()
        .allow_origin(parsed_origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
        .allow_credentials(true)
}

#[derive(Debug, Deserialize)]
struct QueryRequest {
    query: String,
}

#[derive(Debug, Serialize)]
struct QueryInfo {
    original_query: String,
    normalized: String,
    corrected: String,
    processed_query: String,
    detected_language: String,
    language_confidence: f32,
    tokens: Vec<String>,
    script_tags: Vec<String>,
    features: FeatureBag,
}

#[derive(Debug, Serialize)]
struct QueryResponse {
    products: Vec<serde_json::Value>,
    count: usize,
    query_info: QueryInfo,
    metrics: MetricsView,
}

#[derive(Debug, Serialize)]
struct MetricsView {
    total_latency_ms: f64,
    stage_times_ms: std::collections::HashMap<&'static str, f64>,
    early_exit: bool,
    optimizations: Vec<String>,
    cache_hit_rate: f32,
}

impl From<PipelineMetrics> for MetricsView {
    fn from(m: PipelineMetrics) -> Self {
        Self {
            total_latency_ms: m.total_latency_ms,
            stage_times_ms: m.stage_times,
            early_exit: m.early_exit,
            optimizations: m.optimizations_applied,
            cache_hit_rate: m.cache_hit_rate,
        }
    }
}

impl From<PipelineResult> for QueryResponse {
    fn from(result: PipelineResult) -> Self {
        let products = result
            .products
            .into_iter()
            .map(|p| serde_json::json!({ "id": p.id, "data": p.data }))
            .collect::<Vec<_>>();

        let tokens = result.tokenization.tokens.iter().map(|t| t.text.clone()).collect();
        let script_tags = result
            .tokenization
            .tokens
            .iter()
            .map(|t| format!("{:?}", t.tag))
            .collect();

        QueryResponse {
            count: products.len(),
            products,
            query_info: QueryInfo {
                original_query: result.query_text.clone(),
                normalized: result.query_text,
                corrected: result.english_text.clone(),
                processed_query: result.english_text,
                detected_language: result.language.code,
                language_confidence: result.language.confidence,
                tokens,
                script_tags,
                features: result.features,
            },
            metrics: result.metrics.into(),
        }
    }
}

async fn query(
    State(state): State<AppState>,
    Json(request): Json<QueryRequest>,
) -> Result<Json<QueryResponse>, StatusCode> {
    if request.query.trim().is_empty() {
        return Err((&ServerError::EmptyRequest).into());
    }

    match state.pipeline.process(&request.query).await {
        Ok(result) => {
            crate::metrics::record_query(result.metrics.total_latency_ms, result.metrics.early_exit, false);
            Ok(Json(result.into()))
        }
        Err(e) => {
            tracing::error!(error = %e, "pipeline request failed");
            crate::metrics::record_query(0.0, false, true);
            let server_err = ServerError::from(e);
            Err((&server_err).into())
        }
    }
}

async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<serde_json::Value>) {
    let mut checks = serde_json::Map::new();
    let mut healthy = true;

    let service_url = &state.settings.pipeline.transliteration.service_url;
    if service_url.is_empty() {
        checks.insert(
            "transliteration".to_string(),
            serde_json::json!({ "status": "unconfigured" }),
        );
    } else {
        let reachable = reqwest::Client::new()
            .get(format!("{}/health", service_url.trim_end_matches('/')))
            .timeout(std::time::Duration::from_secs(2))
            .send()
            .await
            .map(|resp| resp.status().is_success())
            .unwrap_or(false);
        if !reachable {
            healthy = false;
        }
        checks.insert(
            "transliteration".to_string(),
            serde_json::json!({ "status": if reachable { "ok" } else { "unreachable" } }),
        );
    }

    let status = if healthy { "healthy" } else { "degraded" };
    let code = if healthy { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };
    (
        code,
        Json(serde_json::json!({
            "status": status,
            "version": env!("CARGO_PKG_VERSION"),
            "checks": checks,
        })),
    )
}

async fn metrics_endpoint(handle: PrometheusHandle) -> impl IntoResponse {
    handle.render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use qprep_config::Settings;

    #[test]
    fn router_builds_with_default_settings() {
        let Ok(state) = AppState::new(Settings::default()) else {
            return; // vector index unreachable in this environment
        };
        let handle = crate::metrics::init_metrics();
        let _ = create_router(state, handle);
    }
}
