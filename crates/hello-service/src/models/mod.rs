//! Response bodies for the actuator endpoints.

use serde::Serialize;
use std::collections::BTreeMap;

/// Health status as reported by the probes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HealthStatus {
    Up,
    OutOfService,
}

/// Body of `/actuator/health` and its probe groups.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<&'static str>>,
}

/// Body of `/actuator/metrics`.
#[derive(Debug, Serialize)]
pub struct MetricNamesResponse {
    pub names: Vec<String>,
}

/// A hypermedia link in the actuator discovery document.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct Link {
    pub href: String,
    pub templated: bool,
}

/// Body of `/actuator`.
#[derive(Debug, Serialize)]
pub struct ActuatorIndex {
    #[serde(rename = "_links")]
    pub links: BTreeMap<&'static str, Link>,
}
