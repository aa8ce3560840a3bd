//! Prometheus metrics for request tracking and model monitoring.

use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use tracing::debug;

// === Metric Name Constants ===

/// HTTP request latency metric name.
pub const METRIC_HTTP_REQUEST_LATENCY: &str = "http_request_latency_ms";
/// Categorization requests counter metric name.
pub const METRIC_CATEGORIZE_REQUESTS: &str = "categorize_requests_total";
/// Recommendation requests counter metric name.
pub const METRIC_RECOMMEND_REQUESTS: &str = "recommend_requests_total";
/// Transactions categorized counter metric name.
pub const METRIC_TRANSACTIONS_CATEGORIZED: &str = "transactions_categorized_total";
/// Prediction failures counter metric name.
pub const METRIC_PREDICTION_FAILURES: &str = "prediction_failures_total";

/// Initialize all metric descriptions.
/// Call this once at startup to register metrics with descriptions.
pub fn init_metrics() {
    describe_histogram!(
        METRIC_HTTP_REQUEST_LATENCY,
        "HTTP request latency in milliseconds"
    );

    describe_counter!(
        METRIC_CATEGORIZE_REQUESTS,
        "Total number of categorization requests handled"
    );
    describe_counter!(
        METRIC_RECOMMEND_REQUESTS,
        "Total number of recommendation requests handled"
    );
    describe_counter!(
        METRIC_TRANSACTIONS_CATEGORIZED,
        "Total number of individual transactions categorized"
    );
    describe_counter!(
        METRIC_PREDICTION_FAILURES,
        "Total number of prediction calls that returned an error"
    );

    debug!("Metrics initialized");
}

/// Record HTTP request latency for an endpoint.
pub fn record_http_latency(start: Instant, endpoint: &str) {
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    histogram!(METRIC_HTTP_REQUEST_LATENCY, "endpoint" => endpoint.to_string()).record(latency_ms);
}

/// Increment categorization requests counter.
pub fn inc_categorize_requests() {
    counter!(METRIC_CATEGORIZE_REQUESTS).increment(1);
}

/// Increment recommendation requests counter.
pub fn inc_recommend_requests() {
    counter!(METRIC_RECOMMEND_REQUESTS).increment(1);
}

/// Add to the transactions categorized counter.
pub fn add_transactions_categorized(count: u64) {
    counter!(METRIC_TRANSACTIONS_CATEGORIZED).increment(count);
}

/// Increment prediction failures counter.
pub fn inc_prediction_failures(endpoint: &str) {
    counter!(METRIC_PREDICTION_FAILURES, "endpoint" => endpoint.to_string()).increment(1);
}
