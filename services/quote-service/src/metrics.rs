//! Prometheus counters exposed on `/metrics`.

use prometheus::{register_histogram_vec, register_int_counter_vec, HistogramVec, IntCounterVec};
use std::sync::LazyLock;

pub static IMPORTS_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    register_int_counter_vec!(
        "quote_imports_total",
        "Quote file imports by format and outcome",
        &["format", "outcome"]
    )
    .expect("quote_imports_total registers once")
});

pub static IMPORTED_ITEMS_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    register_int_counter_vec!(
        "quote_imported_items_total",
        "Line items produced by imports",
        &["format"]
    )
    .expect("quote_imported_items_total registers once")
});

pub static PRICED_QUOTES_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    register_int_counter_vec!(
        "quote_priced_total",
        "Quotes priced by pricing mode",
        &["mode"]
    )
    .expect("quote_priced_total registers once")
});

pub static REQUEST_DURATION_SECONDS: LazyLock<HistogramVec> = LazyLock::new(|| {
    register_histogram_vec!(
        "quote_http_request_duration_seconds",
        "HTTP request latency by method and status",
        &["method", "status"]
    )
    .expect("quote_http_request_duration_seconds registers once")
});
