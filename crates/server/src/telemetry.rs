//! Logging and metrics setup.

use metrics::{describe_counter, describe_histogram, Unit};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use tracing_subscriber::EnvFilter;

static METRICS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Install the JSON log subscriber.
///
/// The filter comes from `RUST_LOG`, then `LOG_LEVEL`, then defaults to `info`.
/// Runs before configuration is loaded so that config errors are logged too.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_from_env("LOG_LEVEL"))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(true)
        .with_thread_names(true)
        .json()
        .init();
}

/// Install the Prometheus recorder once and return its handle.
pub fn init_metrics() -> anyhow::Result<PrometheusHandle> {
    let handle = METRICS_HANDLE.get_or_try_init(|| {
        let handle = PrometheusBuilder::new().install_recorder()?;
        describe_metrics();
        tracing::info!("Prometheus metrics recorder initialized");
        Ok::<_, anyhow::Error>(handle)
    })?;
    Ok(handle.clone())
}

fn describe_metrics() {
    describe_counter!(
        "bridge_requests_total",
        "Search requests by outcome (ok, bad_request, unauthorized, upstream_error)"
    );
    describe_histogram!(
        "bridge_request_duration_seconds",
        Unit::Seconds,
        "Time spent serving a search request, including upstream calls"
    );
    describe_histogram!(
        "bridge_search_results",
        Unit::Count,
        "Number of results returned per successful search"
    );
}
