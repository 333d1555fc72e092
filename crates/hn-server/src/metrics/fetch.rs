//! Fan-out metrics.

use metrics::{counter, gauge, histogram};
use std::time::Duration;

/// Registra las metricas del fetcher.
pub fn register_fetch_metrics() {
    metrics::describe_gauge!(
        "hn_fetch_in_flight",
        "Item loads currently holding a limiter permit"
    );
    metrics::describe_counter!(
        "hn_fetch_admissions_total",
        "Item loads admitted by the limiter"
    );
    metrics::describe_histogram!(
        "hn_fetch_admission_wait_seconds",
        "Time spent waiting for a limiter permit"
    );
    metrics::describe_histogram!(
        "hn_fetch_batch_seconds",
        "Time spent resolving one batch of item IDs"
    );
    metrics::describe_histogram!("hn_fetch_batch_size", "Number of IDs per batch");
}

/// Records a granted permit and how long the caller queued for it.
pub fn record_admission(wait: Duration) {
    counter!("hn_fetch_admissions_total").increment(1);
    histogram!("hn_fetch_admission_wait_seconds").record(wait.as_secs_f64());
    gauge!("hn_fetch_in_flight").increment(1.0);
}

pub fn record_release() {
    gauge!("hn_fetch_in_flight").decrement(1.0);
}

/// Records a finished batch. `outcome` is `ok`, `error` or `cancelled`.
pub fn record_batch(size: usize, outcome: &'static str, duration: Duration) {
    histogram!("hn_fetch_batch_size").record(size as f64);
    histogram!("hn_fetch_batch_seconds", "outcome" => outcome).record(duration.as_secs_f64());
}
