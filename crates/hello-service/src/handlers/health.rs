//! Health check handlers.
//!
//! Provides the Kubernetes probe endpoints:
//!
//! - `/actuator/health`: overall status, lists the probe groups
//! - `/actuator/health/liveness`: UP while the process is running
//! - `/actuator/health/readiness`: UP until shutdown begins

use crate::errors::HelloError;
use crate::models::{HealthResponse, HealthStatus};
use crate::services::Availability;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use std::sync::Arc;

/// Probe groups served under `/actuator/health/{group}`.
pub const HEALTH_GROUPS: [&str; 2] = ["liveness", "readiness"];

fn readiness(availability: &Availability) -> (StatusCode, HealthStatus) {
    if availability.is_accepting_traffic() {
        (StatusCode::OK, HealthStatus::Up)
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, HealthStatus::OutOfService)
    }
}

/// Handler for GET /actuator/health
pub async fn health(
    State(availability): State<Arc<Availability>>,
) -> (StatusCode, Json<HealthResponse>) {
    let (code, status) = readiness(&availability);
    (
        code,
        Json(HealthResponse {
            status,
            groups: Some(HEALTH_GROUPS.to_vec()),
        }),
    )
}

/// Handler for GET /actuator/health/{group}
///
/// Liveness never checks dependencies; failure there means the process is
/// hung and Kubernetes restarts the pod.
pub async fn health_group(
    Path(group): Path<String>,
    State(availability): State<Arc<Availability>>,
) -> Result<(StatusCode, Json<HealthResponse>), HelloError> {
    let (code, status) = match group.as_str() {
        "liveness" => (StatusCode::OK, HealthStatus::Up),
        "readiness" => readiness(&availability),
        _ => {
            return Err(HelloError::NotFound(format!(
                "Health group '{}' not found",
                group
            )))
        }
    };

    if status != HealthStatus::Up {
        tracing::warn!(%group, "Health probe reporting not ready");
    }

    Ok((
        code,
        Json(HealthResponse {
            status,
            groups: None,
        }),
    ))
}
