//! Metrics endpoint handlers.
//!
//! - `/actuator/metrics`: names of all registered meters
//! - `/actuator/metrics/{name}`: one meter, optionally narrowed by `tag=key:value`
//! - `/actuator/prometheus`: Prometheus text format for scraping
//!
//! These endpoints are unauthenticated so Prometheus can scrape them. Only
//! operational data with bounded label cardinality is exposed.

use crate::errors::HelloError;
use crate::models::MetricNamesResponse;
use crate::observability::{MeterRegistry, MeterSnapshot};
use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use std::sync::Arc;

/// Content type of the Prometheus text exposition format.
pub const PROMETHEUS_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Handler for GET /actuator/metrics
pub async fn list_metrics(State(registry): State<Arc<MeterRegistry>>) -> Json<MetricNamesResponse> {
    Json(MetricNamesResponse {
        names: registry.names(),
    })
}

/// Handler for GET /actuator/metrics/{name}
///
/// Every `tag` query parameter must have the form `key:value`; all of them
/// must match for a meter to be included.
pub async fn metric_detail(
    Path(name): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
    State(registry): State<Arc<MeterRegistry>>,
) -> Result<Json<MeterSnapshot>, HelloError> {
    let filters = parse_tag_filters(&params)?;

    registry
        .snapshot(&name, &filters)
        .map(Json)
        .ok_or_else(|| HelloError::NotFound(format!("Metric '{}' not found", name)))
}

/// Handler for GET /actuator/prometheus
///
/// # Response
///
/// ```text
/// # HELP hello_counter_total Access counter
/// # TYPE hello_counter_total counter
/// hello_counter_total 3
/// ```
#[tracing::instrument(skip_all, name = "hello.metrics.scrape")]
pub async fn prometheus(State(registry): State<Arc<MeterRegistry>>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, PROMETHEUS_CONTENT_TYPE)],
        registry.render_prometheus(),
    )
}

fn parse_tag_filters(params: &[(String, String)]) -> Result<Vec<(String, String)>, HelloError> {
    params
        .iter()
        .filter(|(key, _)| key == "tag")
        .map(|(_, tag)| match tag.split_once(':') {
            Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
            _ => Err(HelloError::BadRequest(format!(
                "Each tag parameter must be in the form 'key:value' but was: '{}'",
                tag
            ))),
        })
        .collect()
}
