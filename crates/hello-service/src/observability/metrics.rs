//! Metric definitions for Hello Service.
//!
//! Names follow Prometheus conventions:
//! - `_seconds` suffix for durations
//! - counters gain a `_total` suffix at export time
//!
//! # Cardinality
//!
//! Labels are bounded:
//! - `method`: HTTP methods only
//! - `uri`: routed paths, everything else collapses to `UNKNOWN`
//! - `status`: numeric status codes
//! - `outcome`: 5 values (INFORMATIONAL, SUCCESS, REDIRECTION, CLIENT_ERROR, SERVER_ERROR)

use super::registry::MeterRegistry;
use metrics::{describe_gauge, describe_histogram, gauge, histogram, Unit};
use metrics_exporter_prometheus::{BuildError, Matcher, PrometheusBuilder};
use std::time::Duration;

/// Histogram of served HTTP requests.
pub const HTTP_SERVER_REQUESTS: &str = "http_server_requests_seconds";

/// Process uptime gauge.
pub const PROCESS_UPTIME: &str = "process_uptime_seconds";

/// Build the process meter registry.
///
/// The Prometheus recorder is built but not installed globally; all
/// recording goes through the returned registry.
///
/// # Errors
///
/// Returns error if the histogram bucket configuration is rejected.
pub fn init_meter_registry() -> Result<MeterRegistry, BuildError> {
    let exporter = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full(HTTP_SERVER_REQUESTS.to_string()),
            &[
                0.001, 0.005, 0.010, 0.025, 0.050, 0.100, 0.250, 0.500, 1.000, 2.500, 5.000,
            ],
        )?
        .build_recorder();

    let registry = MeterRegistry::new(exporter);
    describe_meters(&registry);
    Ok(registry)
}

fn describe_meters(registry: &MeterRegistry) {
    metrics::with_local_recorder(registry, || {
        describe_histogram!(
            HTTP_SERVER_REQUESTS,
            Unit::Seconds,
            "Duration of HTTP server request handling"
        );
        describe_gauge!(
            PROCESS_UPTIME,
            Unit::Seconds,
            "The uptime of the process"
        );
    });
}

// ============================================================================
// HTTP Request Metrics
// ============================================================================

/// Record HTTP request completion.
///
/// Metric: `http_server_requests_seconds`
/// Labels: `method`, `uri`, `status`, `outcome`
///
/// Captures every response, including framework-level 404/405s.
pub fn record_http_request(
    registry: &MeterRegistry,
    method: &str,
    path: &str,
    status_code: u16,
    duration: Duration,
) {
    let uri = normalize_uri(path, status_code);
    let outcome = categorize_status_code(status_code);

    metrics::with_local_recorder(registry, || {
        histogram!(HTTP_SERVER_REQUESTS,
            "method" => method.to_string(),
            "uri" => uri,
            "status" => status_code.to_string(),
            "outcome" => outcome
        )
        .record(duration.as_secs_f64());
    });
}

/// Record the current process uptime.
pub fn record_uptime(registry: &MeterRegistry, uptime: Duration) {
    metrics::with_local_recorder(registry, || {
        gauge!(PROCESS_UPTIME).set(uptime.as_secs_f64());
    });
}

/// Categorize HTTP status code into an outcome class.
fn categorize_status_code(status_code: u16) -> &'static str {
    match status_code {
        100..=199 => "INFORMATIONAL",
        200..=299 => "SUCCESS",
        300..=399 => "REDIRECTION",
        400..=499 => "CLIENT_ERROR",
        _ => "SERVER_ERROR",
    }
}

/// Normalize a request path to a bounded label value.
///
/// Metric-detail paths carry the meter name and collapse to a template;
/// 404s and unknown paths collapse to `NOT_FOUND` / `UNKNOWN`.
fn normalize_uri(path: &str, status_code: u16) -> String {
    match path {
        "/" | "/actuator" | "/actuator/health" | "/actuator/metrics" | "/actuator/prometheus" => {
            path.to_string()
        }
        "/actuator/health/liveness" | "/actuator/health/readiness" => path.to_string(),
        _ if status_code == 404 => "NOT_FOUND".to_string(),
        _ if path.starts_with("/actuator/metrics/") => {
            "/actuator/metrics/{requiredMetricName}".to_string()
        }
        _ => "UNKNOWN".to_string(),
    }
}
