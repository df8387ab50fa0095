use metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Install the Prometheus exporter and register all application metrics.
/// Returns a `PrometheusHandle` whose `render()` method produces the
/// text/plain Prometheus scrape payload.
pub fn init_metrics() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new().install_recorder()?;

    // Pre-register counters so they appear even before the first increment.
    counter!("candidates_extracted_total").absolute(0);
    counter!("oracle_lookups_total").absolute(0);
    counter!("oracle_lookup_failures_total").absolute(0);
    counter!("fraud_context_pages_total").absolute(0);
    counter!("bins_classified_total").absolute(0);

    // Histogram is lazily created on first record; force creation.
    histogram!("discovery_latency_seconds").record(0.0);

    Ok(handle)
}

/// A handle that renders without installing a global recorder. Tests build
/// several routers per process and only one recorder may be installed.
pub fn detached_handle() -> PrometheusHandle {
    PrometheusBuilder::new().build_recorder().handle()
}
