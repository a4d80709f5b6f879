//! # Transport Trait
//!
//! The seam between a [`ResourceController`](crate::ResourceController) and
//! the network. The controller only ever sees JSON values and
//! [`TransportError`]s; timeouts, TLS and base URLs belong to the
//! implementation.
//!
//! Two implementations ship with the crate:
//!
//! - [`HttpTransport`](crate::http::HttpTransport) - `reqwest` over HTTP
//! - [`MockTransport`](crate::mock::MockTransport) - expectation queue for tests

use crate::error::TransportError;
use async_trait::async_trait;
use serde_json::Value;

/// Asynchronous JSON transport.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    /// Read the resource at `path`.
    async fn get(&self, path: &str) -> Result<Value, TransportError>;

    /// Write `body` to `path`, returning the response body (`Null` when empty).
    async fn post(&self, path: &str, body: Value) -> Result<Value, TransportError>;
}
