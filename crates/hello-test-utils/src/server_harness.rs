//! Test server harness for E2E testing
//!
//! Provides `TestHelloServer` for spawning real Hello Service instances in tests.

use hello_service::config::Config;
use hello_service::observability::metrics::init_meter_registry;
use hello_service::observability::MeterRegistry;
use hello_service::routes::{self, AppState};
use hello_service::services::{
    register_hello_counter, Availability, HelloMetrics, HostnameResolver, StaticHostnameResolver,
};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Host name reported by servers spawned with [`TestHelloServer::spawn`].
pub const TEST_HOSTNAME: &str = "hello-test-host";

/// Test harness for spawning Hello Service in E2E tests.
///
/// Each instance owns a fresh meter registry, so counters start at zero.
///
/// # Example
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_greeting_e2e() -> Result<(), anyhow::Error> {
///     let server = TestHelloServer::spawn().await?;
///
///     let body = reqwest::get(server.url()).await?.text().await?;
///
///     assert!(body.ends_with("Counter value: 1"));
///     Ok(())
/// }
/// ```
pub struct TestHelloServer {
    addr: SocketAddr,
    config: Config,
    registry: Arc<MeterRegistry>,
    availability: Arc<Availability>,
    _handle: JoinHandle<()>,
}

impl TestHelloServer {
    /// Spawn a server with default configuration and a fixed host name.
    pub async fn spawn() -> Result<Self, anyhow::Error> {
        Self::spawn_with(
            &[],
            Arc::new(StaticHostnameResolver(TEST_HOSTNAME.to_string())),
        )
        .await
    }

    /// Spawn a server with extra configuration variables and a custom resolver.
    ///
    /// The server will:
    /// - Bind to a random available port (127.0.0.1:0)
    /// - Start the HTTP server in the background
    pub async fn spawn_with(
        vars: &[(&str, &str)],
        resolver: Arc<dyn HostnameResolver>,
    ) -> Result<Self, anyhow::Error> {
        let mut env: HashMap<String, String> =
            HashMap::from([("BIND_ADDRESS".to_string(), "127.0.0.1:0".to_string())]);
        env.extend(vars.iter().map(|(k, v)| (k.to_string(), v.to_string())));

        let config = Config::from_vars(&env)
            .map_err(|e| anyhow::anyhow!("Failed to create config: {}", e))?;

        let registry = Arc::new(
            init_meter_registry()
                .map_err(|e| anyhow::anyhow!("Failed to build meter registry: {}", e))?,
        );
        let availability = Arc::new(Availability::new());

        let state = Arc::new(AppState {
            config: config.clone(),
            hello_metrics: HelloMetrics::new(register_hello_counter(&registry)),
            resolver,
            availability: availability.clone(),
        });

        // Build routes using the service's real route builder
        let app = routes::build_routes(state, registry.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .map_err(|e| anyhow::anyhow!("Failed to bind test server: {}", e))?;

        let addr = listener
            .local_addr()
            .map_err(|e| anyhow::anyhow!("Failed to get local address: {}", e))?;

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                eprintln!("Test server error: {}", e);
            }
        });

        Ok(Self {
            addr,
            config,
            registry,
            availability,
            _handle: handle,
        })
    }

    /// Get the base URL of the test server.
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Get the socket address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Get reference to the server configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The server's meter registry.
    pub fn registry(&self) -> &MeterRegistry {
        &self.registry
    }

    /// The server's readiness state.
    pub fn availability(&self) -> &Availability {
        &self.availability
    }
}

impl Drop for TestHelloServer {
    fn drop(&mut self) {
        // Abort the HTTP server task for immediate cleanup
        self._handle.abort();
    }
}

/// Parse the value of an un-labelled sample from Prometheus text output.
pub fn prometheus_sample(exposition: &str, sample_name: &str) -> Option<f64> {
    exposition
        .lines()
        .filter(|line| !line.starts_with('#'))
        .find_map(|line| {
            let (name, value) = line.split_once(' ')?;
            if name == sample_name {
                value.trim().parse().ok()
            } else {
                None
            }
        })
}
