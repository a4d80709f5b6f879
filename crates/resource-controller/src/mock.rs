//! # Mock Transport & Testing Guide
//!
//! [`MockTransport`] implements [`Transport`] entirely in memory. Responses are
//! queued up front with a fluent expectation API and handed out in order, so
//! controller tests are fast and deterministic without any HTTP server.
//!
//! ## When to use Mocks vs HTTP
//!
//! | Feature | MockTransport | HttpTransport |
//! |---------|---------------|---------------|
//! | **Speed** | Instant (in-memory) | Real socket round-trip |
//! | **Determinism** | 100% Deterministic | Subject to the server |
//! | **Error Injection** | Easy (`return_err`) | Requires a misbehaving server |
//! | **Use Case** | Controller and page logic | Wire-level behavior |
//!
//! ## Example
//!
//! ```rust
//! use resource_controller::mock::MockTransport;
//! use resource_controller::ResourceController;
//! use serde_json::json;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let mock = MockTransport::new();
//!     mock.expect_get("/api/data").return_ok(json!([1, 2, 3]));
//!
//!     let controller = ResourceController::<Vec<u32>>::new("numbers", "/api/data", mock.transport());
//!     controller.load().settled().await.unwrap();
//!
//!     assert_eq!(controller.current_state().data(), Some(&vec![1, 2, 3]));
//!     mock.verify(); // Ensures all expectations were met
//! }
//! ```
//!
//! ## Testing Failure Scenarios
//!
//! Network partitions and server errors are awkward to reproduce against a
//! real endpoint. With the mock they are one line:
//!
//! ```rust
//! use resource_controller::mock::MockTransport;
//! use resource_controller::TransportError;
//!
//! let mock = MockTransport::new();
//! mock.expect_post("/api/testimonials")
//!     .return_err(TransportError::Status { path: "/api/testimonials".into(), status: 503 });
//! ```

use crate::error::TransportError;
use crate::transport::Transport;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

/// HTTP verb of a recorded or expected call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => f.write_str("GET"),
            Method::Post => f.write_str("POST"),
        }
    }
}

/// A request the mock has received.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

/// Represents an expected request to the mock transport.
struct Expectation {
    method: Method,
    path: String,
    response: Result<Value, TransportError>,
}

#[derive(Default)]
struct Shared {
    expectations: VecDeque<Expectation>,
    calls: Vec<RecordedCall>,
}

/// A mock transport with expectation tracking for fluent testing.
///
/// Clones share the same expectation queue and call log.
#[derive(Clone, Default)]
pub struct MockTransport {
    shared: Arc<Mutex<Shared>>,
}

impl MockTransport {
    /// Creates a new mock transport with no expectations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a handle for use in controllers.
    pub fn transport(&self) -> Arc<dyn Transport> {
        Arc::new(self.clone())
    }

    /// Expects a `get` of `path`.
    pub fn expect_get(&self, path: &str) -> ExpectationBuilder {
        self.expect(Method::Get, path)
    }

    /// Expects a `post` to `path`.
    pub fn expect_post(&self, path: &str) -> ExpectationBuilder {
        self.expect(Method::Post, path)
    }

    fn expect(&self, method: Method, path: &str) -> ExpectationBuilder {
        ExpectationBuilder {
            method,
            path: path.to_string(),
            shared: self.shared.clone(),
        }
    }

    /// All requests received so far, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.lock().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.lock().calls.len()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let shared = self.lock();
        if !shared.expectations.is_empty() {
            panic!(
                "Not all expectations were met. {} remaining",
                shared.expectations.len()
            );
        }
    }

    fn lock(&self) -> MutexGuard<'_, Shared> {
        self.shared.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn respond(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value, TransportError> {
        let mut shared = self.lock();
        shared.calls.push(RecordedCall {
            method,
            path: path.to_string(),
            body,
        });
        match shared.expectations.pop_front() {
            Some(exp) if exp.method == method && exp.path == path => exp.response,
            Some(exp) => panic!(
                "Unexpected request {method} {path}, expected {} {}",
                exp.method, exp.path
            ),
            None => panic!("Unexpected request {method} {path}, no expectations left"),
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get(&self, path: &str) -> Result<Value, TransportError> {
        self.respond(Method::Get, path, None)
    }

    async fn post(&self, path: &str, body: Value) -> Result<Value, TransportError> {
        self.respond(Method::Post, path, Some(body))
    }
}

/// Builder for a single expectation.
pub struct ExpectationBuilder {
    method: Method,
    path: String,
    shared: Arc<Mutex<Shared>>,
}

impl ExpectationBuilder {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: Value) {
        self.push(Ok(value));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: TransportError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<Value, TransportError>) {
        let mut shared = self.shared.lock().unwrap_or_else(|e| e.into_inner());
        shared.expectations.push_back(Expectation {
            method: self.method,
            path: self.path,
            response,
        });
    }
}
