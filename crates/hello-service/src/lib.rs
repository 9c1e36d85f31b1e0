//! Hello Service Library
//!
//! A single greeting endpoint backed by an access counter that is exported
//! to Prometheus, plus the operational `/actuator` endpoints:
//!
//! - `GET /` - greeting with the local host name and the counter value
//! - `/actuator/health` - liveness and readiness probes
//! - `/actuator/metrics` - registry inspection
//! - `/actuator/prometheus` - Prometheus scrape endpoint
//!
//! # Architecture
//!
//! Everything is constructed explicitly at startup and passed down:
//!
//! ```text
//! MeterRegistry -> access counter -> HelloMetrics -> AppState -> handlers
//! ```
//!
//! # Modules
//!
//! - `config` - Service configuration from environment
//! - `errors` - Error types with HTTP status code mapping
//! - `handlers` - HTTP request handlers
//! - `middleware` - HTTP instrumentation
//! - `models` - Response bodies
//! - `observability` - Meter registry and metric definitions
//! - `routes` - Axum router setup
//! - `services` - Metrics facade, host name resolution, availability

pub mod config;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod observability;
pub mod routes;
pub mod services;
