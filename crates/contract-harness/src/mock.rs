//! # Mock Transport & Testing Guide
//!
//! [`MockTransport`] implements [`Transport`] entirely in memory. Tests queue the
//! responses they want the "server" to give, run the scenario steps, then call
//! [`MockTransport::verify`] to make sure every queued response was consumed.
//!
//! | Feature | MockTransport | Live transport |
//! |---------|---------------|----------------|
//! | **Speed** | Instant (in-memory) | Network bound |
//! | **Determinism** | 100% Deterministic | Depends on the live API |
//! | **Error Injection** | Easy (`return_err`) | Hard |
//! | **Use Case** | Testing the harness and scenario logic | Contract runs against the real API |
//!
//! ## Example
//!
//! ```rust
//! use contract_harness::mock::MockTransport;
//! use contract_harness::resource::ResourceConfig;
//! use contract_harness::client::ResourceClient;
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mock = MockTransport::new();
//!     mock.expect_get("rockets").return_json(200, json!([{"name": "Falcon 9"}]));
//!
//!     let config = Arc::new(ResourceConfig::collection("Rockets", "rockets"));
//!     let mut client = ResourceClient::new(config, Arc::new(mock.clone()));
//!     client.list().await.unwrap();
//!
//!     assert_eq!(client.capsule().body_json().unwrap()[0]["name"], "Falcon 9");
//!     mock.verify();
//! }
//! ```
//!
//! Expectations are consumed in FIFO order. A request that does not match the next
//! expectation (method and path) panics, failing the test at the offending step.

use crate::error::TransportError;
use crate::transport::{CapturedResponse, Method, Transport, TransportRequest};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

struct Expectation {
    method: Method,
    path: String,
    response: Result<CapturedResponse, TransportError>,
}

/// An in-memory transport with expectation tracking.
#[derive(Clone, Default)]
pub struct MockTransport {
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
    journal: Arc<Mutex<Vec<TransportRequest>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockTransport {
    /// Creates a mock with no expectations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Expects a request with `method` on `path`.
    pub fn expect(&self, method: Method, path: &str) -> ExpectationBuilder {
        ExpectationBuilder {
            method,
            path: path.trim_matches('/').to_string(),
            expectations: self.expectations.clone(),
        }
    }

    pub fn expect_get(&self, path: &str) -> ExpectationBuilder {
        self.expect(Method::Get, path)
    }

    pub fn expect_post(&self, path: &str) -> ExpectationBuilder {
        self.expect(Method::Post, path)
    }

    pub fn expect_options(&self, path: &str) -> ExpectationBuilder {
        self.expect(Method::Options, path)
    }

    pub fn expect_delete(&self, path: &str) -> ExpectationBuilder {
        self.expect(Method::Delete, path)
    }

    /// Every request received so far, in order.
    pub fn requests(&self) -> Vec<TransportRequest> {
        lock(&self.journal).clone()
    }

    /// Number of expectations not yet consumed.
    pub fn pending(&self) -> usize {
        lock(&self.expectations).len()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let remaining = self.pending();
        if remaining != 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: TransportRequest) -> Result<CapturedResponse, TransportError> {
        lock(&self.journal).push(request.clone());
        let expectation = lock(&self.expectations).pop_front();

        match expectation {
            Some(exp)
                if exp.method == request.method && exp.path == request.path.trim_matches('/') =>
            {
                exp.response
            }
            Some(exp) => panic!(
                "Unexpected request: got {} {}, expected {} {}",
                request.method, request.path, exp.method, exp.path
            ),
            None => panic!(
                "Unexpected request: {} {} (no expectations left)",
                request.method, request.path
            ),
        }
    }
}

/// Builder returned by [`MockTransport::expect`].
pub struct ExpectationBuilder {
    method: Method,
    path: String,
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
}

impl ExpectationBuilder {
    fn push(self, response: Result<CapturedResponse, TransportError>) {
        lock(&self.expectations).push_back(Expectation {
            method: self.method,
            path: self.path,
            response,
        });
    }

    /// Responds with a prepared response.
    pub fn return_ok(self, response: CapturedResponse) {
        self.push(Ok(response));
    }

    /// Responds with `body` serialized as JSON.
    pub fn return_json(self, status: u16, body: Value) {
        self.push(Ok(CapturedResponse::json(status, &body)));
    }

    /// Responds with a plain-text body.
    pub fn return_text(self, status: u16, body: &str) {
        self.push(Ok(CapturedResponse::new(status)
            .with_header("content-type", "text/plain")
            .with_body(body)));
    }

    /// Fails the request at the transport level.
    pub fn return_err(self, error: TransportError) {
        self.push(Err(error));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::RequestOptions;
    use serde_json::json;

    #[tokio::test]
    async fn test_mock_transport_with_expectations() {
        let mock = MockTransport::new();
        mock.expect_get("/ships/").return_json(200, json!([]));
        mock.expect_post("ships/query").return_text(400, "Bad Request");

        let first = mock.get("ships", RequestOptions::new()).await.unwrap();
        assert_eq!(first.status, 200);
        assert_eq!(first.body, "[]");

        let second = mock
            .post("ships/query", RequestOptions::new().data("{"))
            .await
            .unwrap();
        assert_eq!(second.status, 400);

        assert_eq!(mock.requests()[1].body.as_deref(), Some("{"));
        mock.verify();
    }

    #[tokio::test]
    #[should_panic(expected = "Unexpected request")]
    async fn test_mismatched_request_panics() {
        let mock = MockTransport::new();
        mock.expect_get("ships").return_json(200, json!([]));
        let _ = mock.get("rockets", RequestOptions::new()).await;
    }

    #[test]
    #[should_panic(expected = "Not all expectations were met")]
    fn test_verify_reports_leftovers() {
        let mock = MockTransport::new();
        mock.expect_get("ships").return_json(200, json!([]));
        mock.verify();
    }
}
