//! HTTP routes for Hello Service.
//!
//! Defines the Axum router and application state.

use crate::config::{ActuatorEndpoint, Config};
use crate::handlers;
use crate::middleware::http_metrics_middleware;
use crate::observability::MeterRegistry;
use crate::services::{Availability, HelloMetrics, HostnameResolver};
use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

/// Application state shared across the greeting and health handlers.
///
/// The meter registry is not part of this state: the greeting path sees the
/// counter only through `HelloMetrics`.
#[derive(Clone)]
pub struct AppState {
    /// Service configuration.
    pub config: Config,

    /// Access counter facade.
    pub hello_metrics: HelloMetrics,

    /// Local host name lookup.
    pub resolver: Arc<dyn HostnameResolver>,

    /// Readiness state, flipped at shutdown.
    pub availability: Arc<Availability>,
}

/// Build the application routes.
///
/// Creates an Axum router with:
/// - `/` - Greeting with the access counter
/// - `/actuator` - Discovery of the exposed endpoints (when any is exposed)
/// - `/actuator/health[/{group}]` - Probes (when `health` is exposed)
/// - `/actuator/metrics[/{name}]` - Registry inspection (when `metrics` is exposed)
/// - `/actuator/prometheus` - Scrape endpoint (when `prometheus` is exposed)
/// - TraceLayer for request logging
/// - HTTP metrics middleware
/// - Configurable request timeout
pub fn build_routes(state: Arc<AppState>, registry: Arc<MeterRegistry>) -> Router {
    let exposure = state.config.exposure.clone();
    let timeout = Duration::from_secs(state.config.request_timeout_seconds);

    let mut app = Router::new()
        .route("/", get(handlers::hello))
        .with_state(state.clone());

    // Discovery only exists when there is something to discover
    if !exposure.is_empty() {
        app = app.merge(
            Router::new()
                .route("/actuator", get(handlers::actuator_index))
                .with_state(exposure.clone()),
        );
    }

    if exposure.includes(ActuatorEndpoint::Health) {
        app = app.merge(
            Router::new()
                .route("/actuator/health", get(handlers::health))
                .route("/actuator/health/:group", get(handlers::health_group))
                .with_state(state.availability.clone()),
        );
    }

    if exposure.includes(ActuatorEndpoint::Metrics) {
        app = app.merge(
            Router::new()
                .route("/actuator/metrics", get(handlers::list_metrics))
                .route("/actuator/metrics/:name", get(handlers::metric_detail))
                .with_state(registry.clone()),
        );
    }

    if exposure.includes(ActuatorEndpoint::Prometheus) {
        app = app.merge(
            Router::new()
                .route("/actuator/prometheus", get(handlers::prometheus))
                .with_state(registry.clone()),
        );
    }

    // Layer order (bottom-to-top execution):
    // 1. TimeoutLayer - Timeout the request (innermost)
    // 2. TraceLayer - Log request details
    // 3. http_metrics_middleware - Record ALL responses (outermost)
    app.layer(TimeoutLayer::new(timeout))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn_with_state(
            registry,
            http_metrics_middleware,
        ))
}
