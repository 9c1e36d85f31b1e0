//! Greeting endpoint integration tests.
//!
//! Tests `GET /` and the access counter behind it using the
//! `TestHelloServer` harness.

use futures::future::join_all;
use hello_service::services::FailingHostnameResolver;
use hello_test_utils::{prometheus_sample, TestHelloServer, TEST_HOSTNAME};
use std::sync::Arc;

async fn counter_detail_value(server: &TestHelloServer) -> Result<f64, anyhow::Error> {
    let body: serde_json::Value =
        reqwest::get(format!("{}/actuator/metrics/hello_counter", server.url()))
            .await?
            .json()
            .await?;
    body["measurements"][0]["value"]
        .as_f64()
        .ok_or_else(|| anyhow::anyhow!("missing COUNT measurement in {}", body))
}

/// Sequential greetings report 1, 2, 3 and the scrape shows 3.
#[tokio::test]
async fn test_sequential_greetings_count_up() -> Result<(), anyhow::Error> {
    let server = TestHelloServer::spawn().await?;
    let client = reqwest::Client::new();

    for expected in 1..=3 {
        let response = client.get(server.url()).send().await?;
        assert_eq!(response.status(), 200);

        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        assert!(
            content_type
                .as_deref()
                .is_some_and(|ct| ct.starts_with("text/plain")),
            "Expected text/plain content type, got {:?}",
            content_type
        );

        let body = response.text().await?;
        assert_eq!(
            body,
            format!(
                "Hello world from {}!\nCounter value: {}",
                TEST_HOSTNAME, expected
            )
        );
    }

    let scrape = client
        .get(format!("{}/actuator/prometheus", server.url()))
        .send()
        .await?
        .text()
        .await?;
    assert_eq!(prometheus_sample(&scrape, "hello_counter_total"), Some(3.0));

    Ok(())
}

/// Concurrent greetings lose no increments.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_greetings_lose_no_increments() -> Result<(), anyhow::Error> {
    const CONCURRENCY: usize = 50;

    let server = TestHelloServer::spawn().await?;
    let client = reqwest::Client::new();

    // Prime the counter so the batch starts from a non-zero value
    client.get(server.url()).send().await?.error_for_status()?;
    let before = counter_detail_value(&server).await?;

    let responses = join_all((0..CONCURRENCY).map(|_| {
        let client = client.clone();
        let url = server.url();
        async move { client.get(url).send().await?.error_for_status()?.text().await }
    }))
    .await;

    let mut reported = Vec::with_capacity(CONCURRENCY);
    for body in responses {
        let body = body?;
        let value: u64 = body
            .rsplit_once("Counter value: ")
            .and_then(|(_, v)| v.parse().ok())
            .ok_or_else(|| anyhow::anyhow!("unexpected body: {}", body))?;
        reported.push(value);
    }

    assert_eq!(counter_detail_value(&server).await?, before + CONCURRENCY as f64);

    // Each response saw at least its own increment and at most the whole batch
    let after = before + CONCURRENCY as f64;
    assert!(reported
        .iter()
        .all(|v| *v as f64 > before && *v as f64 <= after));

    Ok(())
}

/// A failed host name lookup yields 500 and does not count the request.
#[tokio::test]
async fn test_host_resolution_failure_returns_500() -> Result<(), anyhow::Error> {
    let server = TestHelloServer::spawn_with(&[], Arc::new(FailingHostnameResolver)).await?;

    let response = reqwest::get(server.url()).await?;
    assert_eq!(response.status(), 500);

    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["error"]["code"], "HOST_RESOLUTION_ERROR");
    // Generic message, no resolver details
    assert_eq!(body["error"]["message"], "An internal error occurred");

    assert_eq!(counter_detail_value(&server).await?, 0.0);

    Ok(())
}

/// Only GET is routed on the greeting path.
#[tokio::test]
async fn test_post_greeting_not_allowed() -> Result<(), anyhow::Error> {
    let server = TestHelloServer::spawn().await?;

    let response = reqwest::Client::new().post(server.url()).send().await?;
    assert_eq!(response.status(), 405);

    assert_eq!(counter_detail_value(&server).await?, 0.0);

    Ok(())
}
