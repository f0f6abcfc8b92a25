//! Prometheus metrics exposition (§6.6 **[AMBIENT]**).

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Installs the global `metrics` recorder and returns a handle whose
/// `render()` produces the text exposition format served at `/metrics`.
pub fn init_metrics() -> PrometheusHandle {
    PrometheusBuilder::new()
        .install_recorder()
        .expect("failed to install Prometheus recorder")
}

/// Records one `/query` request's outcome and latency.
pub fn record_query(latency_ms: f64, early_exit: bool, error: bool) {
    metrics::histogram!("qprep_query_latency_ms").record(latency_ms);
    metrics::counter!("qprep_query_total").increment(1);
    if early_exit {
        metrics::counter!("qprep_query_early_exit_total").increment(1);
    }
    if error {
        metrics::counter!("qprep_query_error_total").increment(1);
    }
}
