//! Hello Service
//!
//! Entry point: builds the meter registry, the access counter and its
//! facade, then serves the greeting and actuator endpoints.

use hello_service::config::Config;
use hello_service::observability::metrics::{init_meter_registry, record_uptime};
use hello_service::observability::MeterRegistry;
use hello_service::routes::{self, AppState};
use hello_service::services::{
    register_hello_counter, Availability, HelloMetrics, SystemHostnameResolver,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let started = Instant::now();

    // Load configuration first: it selects the log format
    let config = Config::from_env().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        e
    })?;

    init_tracing(config.json_logs);

    info!("Starting Hello Service");
    info!(
        bind_address = %config.bind_address,
        exposure = ?config.exposure.iter().map(|e| e.id()).collect::<Vec<_>>(),
        request_timeout_seconds = config.request_timeout_seconds,
        "Configuration loaded successfully"
    );

    // Registry -> counter -> facade -> handler state, in that order
    let registry = Arc::new(init_meter_registry().map_err(|e| {
        error!("Failed to build meter registry: {}", e);
        e
    })?);
    let hello_metrics = HelloMetrics::new(register_hello_counter(&registry));
    let availability = Arc::new(Availability::new());

    let bind_address = config.bind_address.clone();
    let upkeep_interval = Duration::from_secs(config.metrics_upkeep_interval_seconds);
    let drain = Duration::from_secs(config.shutdown_drain_seconds);

    let state = Arc::new(AppState {
        config,
        hello_metrics,
        resolver: Arc::new(SystemHostnameResolver),
        availability: availability.clone(),
    });

    let app = routes::build_routes(state, registry.clone());

    let upkeep = tokio::spawn(run_metrics_upkeep(
        registry.clone(),
        upkeep_interval,
        started,
    ));

    let addr: SocketAddr = bind_address.parse().map_err(|e| {
        error!("Invalid bind address: {}", e);
        e
    })?;

    info!("Hello Service listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(availability, drain))
        .await?;

    upkeep.abort();
    info!("Hello Service shutdown complete");

    Ok(())
}

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "hello_service=info,tower_http=info".into());

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

/// Periodically drains exporter histograms and refreshes the uptime gauge.
async fn run_metrics_upkeep(registry: Arc<MeterRegistry>, every: Duration, started: Instant) {
    let mut interval = tokio::time::interval(every);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        interval.tick().await;
        record_uptime(&registry, started.elapsed());
        registry.run_upkeep();
    }
}

/// Listens for shutdown signals (SIGTERM, SIGINT).
///
/// Readiness goes OUT_OF_SERVICE as soon as a signal arrives; the listener
/// keeps serving for the drain period so the load balancer can react.
async fn shutdown_signal(availability: Arc<Availability>, drain: Duration) {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received SIGINT, starting graceful shutdown..."),
            Err(e) => error!("Failed to listen for SIGINT: {}", e),
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received SIGTERM, starting graceful shutdown...");
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    availability.refuse_traffic();

    if drain.is_zero() {
        info!("Skipping drain period (SHUTDOWN_DRAIN_SECONDS=0)");
    } else {
        warn!("Draining connections for {} seconds...", drain.as_secs());
        tokio::time::sleep(drain).await;
        info!("Drain period complete");
    }
}
