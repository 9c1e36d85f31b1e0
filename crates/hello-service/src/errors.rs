//! Hello Service error types.
//!
//! All errors map to HTTP status codes via the `IntoResponse` impl.
//! Messages returned to clients stay generic; details are logged server-side.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// The local host name could not be determined or does not resolve.
#[derive(Debug, Error)]
#[error("Unable to resolve local host name: {0}")]
pub struct HostResolutionError(pub String);

/// Hello Service error type.
///
/// Maps to HTTP status codes:
/// - HostResolution, Internal: 500 Internal Server Error
/// - NotFound: 404 Not Found
/// - BadRequest: 400 Bad Request
#[derive(Debug, Error)]
pub enum HelloError {
    #[error(transparent)]
    HostResolution(#[from] HostResolutionError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error")]
    Internal,
}

impl HelloError {
    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            HelloError::HostResolution(_) | HelloError::Internal => 500,
            HelloError::NotFound(_) => 404,
            HelloError::BadRequest(_) => 400,
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

impl IntoResponse for HelloError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            HelloError::HostResolution(err) => {
                tracing::error!(target: "hello.hostname", error = %err, "Host name resolution failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "HOST_RESOLUTION_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
            HelloError::NotFound(resource) => {
                (StatusCode::NOT_FOUND, "NOT_FOUND", resource.clone())
            }
            HelloError::BadRequest(reason) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", reason.clone())
            }
            HelloError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            ),
        };

        let error_response = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };

        (status, Json(error_response)).into_response()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use axum::body::Body;
    use http_body_util::BodyExt;

    async fn read_body_json(body: Body) -> serde_json::Value {
        let bytes = body.collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_display_host_resolution() {
        let error = HelloError::from(HostResolutionError("no such host".to_string()));
        assert_eq!(
            format!("{}", error),
            "Unable to resolve local host name: no such host"
        );
    }

    #[test]
    fn test_display_not_found() {
        let error = HelloError::NotFound("metric".to_string());
        assert_eq!(format!("{}", error), "Not found: metric");
    }

    #[test]
    fn test_display_bad_request() {
        let error = HelloError::BadRequest("bad tag".to_string());
        assert_eq!(format!("{}", error), "Bad request: bad tag");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            HelloError::HostResolution(HostResolutionError("x".to_string())).status_code(),
            500
        );
        assert_eq!(HelloError::NotFound("x".to_string()).status_code(), 404);
        assert_eq!(HelloError::BadRequest("x".to_string()).status_code(), 400);
        assert_eq!(HelloError::Internal.status_code(), 500);
    }

    #[tokio::test]
    async fn test_into_response_host_resolution_is_generic() {
        let error = HelloError::from(HostResolutionError("resolver at 10.0.0.2 down".to_string()));
        let response = error.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body_json = read_body_json(response.into_body()).await;
        assert_eq!(body_json["error"]["code"], "HOST_RESOLUTION_ERROR");
        assert_eq!(body_json["error"]["message"], "An internal error occurred");
    }

    #[tokio::test]
    async fn test_into_response_not_found() {
        let error = HelloError::NotFound("Metric 'nope' not found".to_string());
        let response = error.into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body_json = read_body_json(response.into_body()).await;
        assert_eq!(body_json["error"]["code"], "NOT_FOUND");
        assert_eq!(body_json["error"]["message"], "Metric 'nope' not found");
    }

    #[tokio::test]
    async fn test_into_response_bad_request() {
        let error = HelloError::BadRequest("tag must be key:value".to_string());
        let response = error.into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body_json = read_body_json(response.into_body()).await;
        assert_eq!(body_json["error"]["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_into_response_internal() {
        let response = HelloError::Internal.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body_json = read_body_json(response.into_body()).await;
        assert_eq!(body_json["error"]["code"], "INTERNAL_ERROR");
    }
}
