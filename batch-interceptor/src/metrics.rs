//! Prometheus metrics for the interceptor chain

use lazy_static::lazy_static;
use prometheus::{
    register_counter_vec, register_histogram, register_int_counter_vec, CounterVec, Histogram,
    IntCounterVec,
};

lazy_static! {
    /// Total dispatches through the chain
    pub static ref DISPATCH_TOTAL: CounterVec = register_counter_vec!(
        "interceptor_dispatch_total",
        "Total batches dispatched through the interceptor chain",
        &["status"]
    )
    .unwrap();

    /// Dispatch duration
    pub static ref DISPATCH_DURATION: Histogram = register_histogram!(
        "interceptor_dispatch_duration_seconds",
        "Interceptor chain dispatch duration in seconds"
    )
    .unwrap();

    /// Registry lookups
    pub static ref REGISTRY_RESOLVE_TOTAL: CounterVec = register_counter_vec!(
        "interceptor_registry_resolve_total",
        "Interceptor registry lookups",
        &["status"]
    )
    .unwrap();

    /// Records seen by the counting interceptor, tagged with the service name
    pub static ref RECORDS_CONSUMED_TOTAL: IntCounterVec = register_int_counter_vec!(
        "interceptor_records_consumed_total",
        "Records consumed per topic",
        &["topic", "service"]
    )
    .unwrap();
}
