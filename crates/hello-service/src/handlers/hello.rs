//! Greeting handler.

use crate::errors::HelloError;
use crate::routes::AppState;
use axum::extract::State;
use std::sync::Arc;

/// Handler for GET /
///
/// Resolves the local host name, counts the greeting and answers with
/// both. The host name is resolved first: when the lookup fails the request
/// fails with 500 and the counter is left untouched.
///
/// # Response
///
/// ```text
/// Hello world from pod-7f9c!
/// Counter value: 3
/// ```
#[tracing::instrument(skip_all, name = "hello.greeting")]
pub async fn hello(State(state): State<Arc<AppState>>) -> Result<String, HelloError> {
    let resolver = Arc::clone(&state.resolver);
    let hostname = tokio::task::spawn_blocking(move || resolver.canonical_hostname())
        .await
        .map_err(|e| {
            tracing::error!(target: "hello.hostname", error = %e, "Host name lookup task failed");
            HelloError::Internal
        })??;

    state.hello_metrics.increment();
    let value = state.hello_metrics.value();

    tracing::debug!(%hostname, counter = value, "Greeting served");

    Ok(format!(
        "Hello world from {}!\nCounter value: {}",
        hostname, value
    ))
}
