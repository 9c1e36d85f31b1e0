//! Actuator discovery document.

use crate::config::{ActuatorEndpoint, Exposure};
use crate::models::{ActuatorIndex, Link};
use axum::extract::State;
use axum::http::{header, HeaderMap};
use axum::Json;
use std::collections::BTreeMap;

/// Handler for GET /actuator
///
/// Lists links to the exposed endpoints. Links are absolute when the
/// request carries a `Host` header.
pub async fn index(State(exposure): State<Exposure>, headers: HeaderMap) -> Json<ActuatorIndex> {
    let base = headers
        .get(header::HOST)
        .and_then(|host| host.to_str().ok())
        .map(|host| format!("http://{}/actuator", host))
        .unwrap_or_else(|| "/actuator".to_string());

    Json(ActuatorIndex {
        links: links(&base, &exposure),
    })
}

fn links(base: &str, exposure: &Exposure) -> BTreeMap<&'static str, Link> {
    let link = |suffix: &str, templated: bool| Link {
        href: format!("{}{}", base, suffix),
        templated,
    };

    let mut links = BTreeMap::new();
    links.insert("self", link("", false));

    for endpoint in exposure.iter() {
        match endpoint {
            ActuatorEndpoint::Health => {
                links.insert("health", link("/health", false));
                links.insert("health-path", link("/health/{*path}", true));
            }
            ActuatorEndpoint::Metrics => {
                links.insert("metrics", link("/metrics", false));
                links.insert(
                    "metrics-requiredMetricName",
                    link("/metrics/{requiredMetricName}", true),
                );
            }
            ActuatorEndpoint::Prometheus => {
                links.insert("prometheus", link("/prometheus", false));
            }
        }
    }

    links
}
