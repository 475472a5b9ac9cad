//! Prometheus metrics for the user lookup path.

use crate::LookupResult;
use metrics::{counter, describe_counter, describe_histogram, histogram};
use std::time::Duration;
use users_core::UsersError;

/// Metric names for the lookup path.
pub mod names {
    /// Lookups answered, labelled by source.
    pub const LOOKUPS_TOTAL: &str = "users_lookups_total";
    /// Lookups for a username neither cache nor store knows.
    pub const LOOKUP_MISSES_TOTAL: &str = "users_lookup_misses_total";
    /// Lookup duration in seconds.
    pub const LOOKUP_DURATION_SECONDS: &str = "users_lookup_duration_seconds";
    /// Cache operations that failed and were degraded around.
    pub const CACHE_ERRORS_TOTAL: &str = "users_cache_errors_total";
    /// Store operations that failed.
    pub const STORE_ERRORS_TOTAL: &str = "users_store_errors_total";
}

/// Register all metric descriptions.
pub fn register_metrics() {
    describe_counter!(
        names::LOOKUPS_TOTAL,
        "Total number of user lookups by answering source"
    );
    describe_counter!(
        names::LOOKUP_MISSES_TOTAL,
        "Total number of lookups for unknown usernames"
    );
    describe_histogram!(
        names::LOOKUP_DURATION_SECONDS,
        "User lookup duration in seconds"
    );
    describe_counter!(
        names::CACHE_ERRORS_TOTAL,
        "Total number of failed cache operations"
    );
    describe_counter!(
        names::STORE_ERRORS_TOTAL,
        "Total number of failed store operations"
    );
}

/// Lookup metrics recorder.
#[derive(Clone)]
pub struct LookupMetrics;

impl LookupMetrics {
    /// Record a completed lookup.
    pub fn lookup_completed(result: &LookupResult, duration: Duration) {
        let source = result.source.as_str();
        counter!(names::LOOKUPS_TOTAL, "source" => source).increment(1);

        if !result.is_found() {
            counter!(names::LOOKUP_MISSES_TOTAL).increment(1);
        }

        histogram!(names::LOOKUP_DURATION_SECONDS, "source" => source)
            .record(duration.as_secs_f64());
    }

    /// Record a failed cache operation.
    pub fn cache_error(operation: &'static str) {
        counter!(names::CACHE_ERRORS_TOTAL, "operation" => operation).increment(1);
    }

    /// Record a failed store operation.
    pub fn store_error(operation: &'static str, error: &UsersError) {
        counter!(
            names::STORE_ERRORS_TOTAL,
            "operation" => operation,
            "code" => error.error_code()
        )
        .increment(1);
    }
}
