//! Hello Service configuration.
//!
//! Configuration is loaded from environment variables. Every setting has a
//! default, so the service starts with no environment at all.

use std::collections::{BTreeSet, HashMap};
use std::env;
use std::fmt;
use thiserror::Error;

/// Default server bind address.
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

/// Default actuator exposure list.
pub const DEFAULT_EXPOSURE_INCLUDE: &str = "health,metrics,prometheus";

/// Default request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 30;

/// Default interval between Prometheus exporter upkeep runs.
pub const DEFAULT_METRICS_UPKEEP_INTERVAL_SECONDS: u64 = 5;

/// Default drain period between readiness going down and listener shutdown.
pub const DEFAULT_SHUTDOWN_DRAIN_SECONDS: u64 = 5;

/// Operational endpoints that can be exposed under `/actuator`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ActuatorEndpoint {
    Health,
    Metrics,
    Prometheus,
}

impl ActuatorEndpoint {
    /// All known endpoints, in discovery order.
    pub const ALL: [ActuatorEndpoint; 3] = [
        ActuatorEndpoint::Health,
        ActuatorEndpoint::Metrics,
        ActuatorEndpoint::Prometheus,
    ];

    /// Endpoint id as used in the exposure list and in URLs.
    pub fn id(self) -> &'static str {
        match self {
            ActuatorEndpoint::Health => "health",
            ActuatorEndpoint::Metrics => "metrics",
            ActuatorEndpoint::Prometheus => "prometheus",
        }
    }

    fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|endpoint| endpoint.id() == id)
    }
}

impl fmt::Display for ActuatorEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// The set of actuator endpoints routed by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Exposure {
    endpoints: BTreeSet<ActuatorEndpoint>,
}

impl Exposure {
    /// Parse a comma-separated list of endpoint ids. `*` exposes everything.
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        let mut endpoints = BTreeSet::new();

        for id in value.split(',').map(str::trim).filter(|id| !id.is_empty()) {
            if id == "*" {
                endpoints.extend(ActuatorEndpoint::ALL);
                continue;
            }

            let endpoint = ActuatorEndpoint::from_id(id).ok_or_else(|| {
                ConfigError::InvalidExposure(format!(
                    "unknown actuator endpoint '{}', expected one of: health, metrics, prometheus, *",
                    id
                ))
            })?;
            endpoints.insert(endpoint);
        }

        Ok(Self { endpoints })
    }

    /// Whether the given endpoint is routed.
    pub fn includes(&self, endpoint: ActuatorEndpoint) -> bool {
        self.endpoints.contains(&endpoint)
    }

    /// Whether no endpoint is exposed at all.
    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    /// Exposed endpoints in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = ActuatorEndpoint> + '_ {
        self.endpoints.iter().copied()
    }
}

/// Hello Service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (default: "0.0.0.0:8080").
    pub bind_address: String,

    /// Actuator endpoints exposed over HTTP.
    pub exposure: Exposure,

    /// Per-request timeout in seconds.
    pub request_timeout_seconds: u64,

    /// Interval between Prometheus exporter upkeep runs.
    pub metrics_upkeep_interval_seconds: u64,

    /// Seconds to keep serving after readiness reports OUT_OF_SERVICE.
    pub shutdown_drain_seconds: u64,

    /// Emit JSON log lines instead of human-readable text.
    pub json_logs: bool,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid bind address configuration: {0}")]
    InvalidBindAddress(String),

    #[error("Invalid actuator exposure configuration: {0}")]
    InvalidExposure(String),

    #[error("Invalid duration configuration: {0}")]
    InvalidDuration(String),

    #[error("Invalid log format configuration: {0}")]
    InvalidLogFormat(String),
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Load configuration from a HashMap (for testing).
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        // BIND_ADDRESS wins; SERVER_PORT is the conventional port-only override
        let bind_address = if let Some(address) = vars.get("BIND_ADDRESS") {
            address.clone()
        } else if let Some(port_str) = vars.get("SERVER_PORT") {
            let port: u16 = port_str.parse().map_err(|e| {
                ConfigError::InvalidBindAddress(format!(
                    "SERVER_PORT must be a valid port number, got '{}': {}",
                    port_str, e
                ))
            })?;
            format!("0.0.0.0:{}", port)
        } else {
            DEFAULT_BIND_ADDRESS.to_string()
        };

        let exposure = Exposure::parse(
            vars.get("MANAGEMENT_ENDPOINTS_WEB_EXPOSURE_INCLUDE")
                .map(String::as_str)
                .unwrap_or(DEFAULT_EXPOSURE_INCLUDE),
        )?;

        let request_timeout_seconds = parse_positive_seconds(
            vars,
            "REQUEST_TIMEOUT_SECONDS",
            DEFAULT_REQUEST_TIMEOUT_SECONDS,
        )?;

        let metrics_upkeep_interval_seconds = parse_positive_seconds(
            vars,
            "METRICS_UPKEEP_INTERVAL_SECONDS",
            DEFAULT_METRICS_UPKEEP_INTERVAL_SECONDS,
        )?;

        // Zero is allowed here: it skips the drain entirely
        let shutdown_drain_seconds = if let Some(value_str) = vars.get("SHUTDOWN_DRAIN_SECONDS")
        {
            value_str.parse().map_err(|e| {
                ConfigError::InvalidDuration(format!(
                    "SHUTDOWN_DRAIN_SECONDS must be a valid non-negative integer, got '{}': {}",
                    value_str, e
                ))
            })?
        } else {
            DEFAULT_SHUTDOWN_DRAIN_SECONDS
        };

        let json_logs = match vars.get("LOG_FORMAT").map(String::as_str) {
            None | Some("text") => false,
            Some("json") => true,
            Some(other) => {
                return Err(ConfigError::InvalidLogFormat(format!(
                    "LOG_FORMAT must be 'text' or 'json', got '{}'",
                    other
                )))
            }
        };

        Ok(Config {
            bind_address,
            exposure,
            request_timeout_seconds,
            metrics_upkeep_interval_seconds,
            shutdown_drain_seconds,
            json_logs,
        })
    }
}

fn parse_positive_seconds(
    vars: &HashMap<String, String>,
    name: &str,
    default: u64,
) -> Result<u64, ConfigError> {
    let Some(value_str) = vars.get(name) else {
        return Ok(default);
    };

    let value: u64 = value_str.parse().map_err(|e| {
        ConfigError::InvalidDuration(format!(
            "{} must be a valid positive integer, got '{}': {}",
            name, value_str, e
        ))
    })?;

    if value == 0 {
        return Err(ConfigError::InvalidDuration(format!(
            "{} must be greater than 0",
            name
        )));
    }

    Ok(value)
}
