//! # HTTP Transport
//!
//! [`HttpTransport`] sends JSON over `reqwest`. Paths are joined onto a base
//! URL; any non-2xx status becomes [`TransportError::Status`] and an empty
//! body decodes to `Value::Null`.

use crate::error::TransportError;
use crate::transport::Transport;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Settings for building an [`HttpTransport`].
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3000".into(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, TransportError> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("resource-controller/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TransportError::InvalidRequest(format!("failed to build HTTP client: {e}")))
    }
}

/// JSON-over-HTTP [`Transport`].
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl HttpTransport {
    pub fn new(config: &TransportConfig) -> Result<Self, TransportError> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(TransportError::InvalidRequest(format!(
                "base URL must start with http:// or https://, got {:?}",
                config.base_url
            )));
        }
        Ok(Self {
            client: config.build_client()?,
            base_url,
            timeout: config.timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> Result<String, TransportError> {
        if !path.starts_with('/') {
            return Err(TransportError::InvalidRequest(format!(
                "path must start with '/', got {path:?}"
            )));
        }
        Ok(format!("{}{}", self.base_url, path))
    }

    fn map_send_error(&self, e: reqwest::Error) -> TransportError {
        if e.is_timeout() {
            TransportError::Network(format!(
                "request timed out after {}s",
                self.timeout.as_secs()
            ))
        } else {
            TransportError::Network(e.to_string())
        }
    }

    async fn read(&self, path: &str, response: reqwest::Response) -> Result<Value, TransportError> {
        let status = response.status();
        debug!(path, status = status.as_u16(), "Response");
        if !status.is_success() {
            return Err(TransportError::Status {
                path: path.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| self.map_send_error(e))?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&body).map_err(|e| TransportError::Decode(e.to_string()))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, path: &str) -> Result<Value, TransportError> {
        let url = self.url(path)?;
        debug!(%url, "GET");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;
        self.read(path, response).await
    }

    async fn post(&self, path: &str, body: Value) -> Result<Value, TransportError> {
        let url = self.url(path)?;
        debug!(%url, "POST");
        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;
        self.read(path, response).await
    }
}
