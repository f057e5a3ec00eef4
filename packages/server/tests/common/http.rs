//! HTTP client for route-level testing.
//!
//! Drives the router in-process through `tower::ServiceExt::oneshot`, so no
//! socket is bound.

use axum::body::{to_bytes, Body};
use axum::http::{header::CONTENT_TYPE, Method, Request, StatusCode};
use axum::Router;
use personnel_core::kernel::ServerDeps;
use personnel_core::server::build_app;
use serde_json::Value;
use tower::ServiceExt;

/// Client for issuing requests against a freshly built router.
pub struct HttpClient {
    router: Router,
}

/// Status plus raw body of a response.
#[derive(Debug)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub body: String,
}

impl HttpResponse {
    /// Parses the body as JSON, panicking with the raw text if it is not.
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body)
            .unwrap_or_else(|e| panic!("Response is not JSON ({e}): {}", self.body))
    }

    /// Error code from an `ErrorResponse` body.
    pub fn error_code(&self) -> String {
        self.json()["code"]
            .as_str()
            .unwrap_or_else(|| panic!("Response has no error code: {}", self.body))
            .to_string()
    }
}

impl HttpClient {
    pub fn new(deps: ServerDeps) -> Self {
        Self {
            router: build_app(deps, &[]),
        }
    }

    pub async fn get(&self, uri: &str) -> HttpResponse {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> HttpResponse {
        self.send(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> HttpResponse {
        self.send(Method::PUT, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> HttpResponse {
        self.send(Method::DELETE, uri, None).await
    }

    async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> HttpResponse {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router is infallible");

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");

        HttpResponse {
            status,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }
}
