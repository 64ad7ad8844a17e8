//! Prometheus metrics served on `/metrics`.
//!
//! HTTP request metrics come from the middleware. Lifecycle counters are
//! bumped by the pull request handlers after a successful call.

use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use lazy_static::lazy_static;
use prometheus::{IntCounter, Opts};

const NAMESPACE: &str = "prassign";

fn lifecycle_counter(name: &str, help: &str) -> IntCounter {
    IntCounter::with_opts(Opts::new(name, help).namespace(NAMESPACE)).unwrap()
}

lazy_static! {
    pub static ref PULL_REQUESTS_CREATED: IntCounter =
        lifecycle_counter("pull_requests_created", "Pull requests created with reviewers");
    pub static ref PULL_REQUESTS_MERGED: IntCounter = lifecycle_counter(
        "pull_requests_merged",
        "Merge calls, idempotent repeats included"
    );
    pub static ref REVIEWERS_REASSIGNED: IntCounter =
        lifecycle_counter("reviewers_reassigned", "Reviewer slots swapped");
}

pub(crate) fn build_metrics_handler() -> PrometheusMetrics {
    let prometheus = PrometheusMetricsBuilder::new(NAMESPACE)
        .endpoint("/metrics")
        .build()
        .unwrap();

    setup_process_metrics(&prometheus);

    for counter in [
        &*PULL_REQUESTS_CREATED,
        &*PULL_REQUESTS_MERGED,
        &*REVIEWERS_REASSIGNED,
    ] {
        prometheus
            .registry
            .register(Box::new(counter.clone()))
            .unwrap();
    }

    prometheus
}

#[cfg(unix)]
fn setup_process_metrics(metrics: &PrometheusMetrics) {
    use prometheus::process_collector::ProcessCollector;

    metrics
        .registry
        .register(Box::new(ProcessCollector::for_self()))
        .unwrap();
}

#[cfg(not(unix))]
fn setup_process_metrics(_metrics: &PrometheusMetrics) {
    tracing::warn!("Process metrics need procfs, skipping them.");
}
