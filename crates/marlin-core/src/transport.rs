//! Transport capability and its production HTTP implementation.
//!
//! The engine never talks to the network directly: it executes requests
//! through the [`Transport`] trait, injected at [`Api`](crate::client::Api)
//! construction so tests can swap in doubles. Cancellation is cooperative:
//! the handle drops the in-flight `execute` future when its cancellation
//! token fires.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use thiserror::Error;
use tracing::debug;

use crate::client::ApiRequest;
use crate::error::{Error, Result};
use crate::result::FailureReason;

const USER_AGENT: &str = concat!("marlin/", env!("CARGO_PKG_VERSION"));

/// Default request timeout.
pub const DEFAULT_TIMEOUT: u64 = 30;

/// Default idle timeout for connection pools.
pub const DEFAULT_POOL_IDLE_TIMEOUT: u64 = 90;

/// Default maximum idle connections per host.
pub const DEFAULT_POOL_MAX_IDLE_PER_HOST: usize = 10;

/// Raw response produced by a transport, consumed once by the decoder.
#[derive(Debug, Clone)]
pub struct RawResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Option<Vec<u8>>,
}

impl RawResponse {
    /// Create a response from its parts. An empty body is normalized to `None`.
    #[must_use]
    pub fn new(status: StatusCode, headers: HeaderMap, body: Option<Vec<u8>>) -> Self {
        let body = body.filter(|bytes| !bytes.is_empty());
        Self {
            status,
            headers,
            body,
        }
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Response headers.
    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Raw body bytes, if the response carried any.
    #[must_use]
    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }
}

/// Failure observed before any HTTP response was obtained.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportFailure {
    /// No network connectivity.
    #[error("not connected: {0}")]
    NotConnected(String),

    /// The request did not complete in time.
    #[error("timed out: {0}")]
    TimedOut(String),

    /// The request was aborted.
    #[error("request cancelled")]
    Cancelled,

    /// Any other transport-level error.
    #[error("transport error: {0}")]
    Other(String),
}

impl TransportFailure {
    /// Classify this failure for the result model.
    #[must_use]
    pub const fn reason(&self) -> FailureReason {
        match self {
            Self::NotConnected(_) => FailureReason::NotConnectedToInternet,
            Self::Cancelled => FailureReason::Cancelled,
            Self::TimedOut(_) | Self::Other(_) => FailureReason::Other,
        }
    }
}

impl From<reqwest::Error> for TransportFailure {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::TimedOut(err.to_string())
        } else if err.is_connect() {
            Self::NotConnected(err.to_string())
        } else {
            Self::Other(err.to_string())
        }
    }
}

/// Executes one request and yields the raw response or a transport failure.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute the request to completion.
    async fn execute(
        &self,
        request: &ApiRequest,
    ) -> std::result::Result<RawResponse, TransportFailure>;
}

/// HTTP client tuning for [`HttpTransport`].
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Request timeout
    pub timeout: Duration,

    /// Connection pool idle timeout
    pub pool_idle_timeout: Duration,

    /// Maximum idle connections per host
    pub pool_max_idle_per_host: usize,

    /// Enable response compression
    pub enable_compression: bool,
}

impl TransportConfig {
    /// Create a configuration with default values.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT),
            pool_idle_timeout: Duration::from_secs(DEFAULT_POOL_IDLE_TIMEOUT),
            pool_max_idle_per_host: DEFAULT_POOL_MAX_IDLE_PER_HOST,
            enable_compression: true,
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the connection pool idle timeout.
    #[must_use]
    pub const fn with_pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.pool_idle_timeout = timeout;
        self
    }

    /// Set the maximum idle connections per host.
    #[must_use]
    pub const fn with_pool_max_idle(mut self, max: usize) -> Self {
        self.pool_max_idle_per_host = max;
        self
    }

    /// Enable or disable compression.
    #[must_use]
    pub const fn with_compression(mut self, enabled: bool) -> Self {
        self.enable_compression = enabled;
        self
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Production transport over a pooled `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport with default tuning.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new() -> Result<Self> {
        Self::with_config(TransportConfig::new())
    }

    /// Create a transport with explicit tuning.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn with_config(config: TransportConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .gzip(config.enable_compression)
            .build()
            .map_err(|e| Error::ConfigError(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(
        &self,
        request: &ApiRequest,
    ) -> std::result::Result<RawResponse, TransportFailure> {
        debug!(method = %request.method(), url = %request.url(), "executing request");

        let mut builder = self
            .client
            .request(request.method().clone(), request.url().clone())
            .headers(request.headers().clone());
        if let Some(body) = request.body() {
            builder = builder.body(body.to_vec());
        }

        let response = builder.send().await.map_err(TransportFailure::from)?;
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.bytes().await.map_err(TransportFailure::from)?;

        debug!(status = status.as_u16(), bytes = bytes.len(), "response received");

        Ok(RawResponse::new(status, headers, Some(bytes.to_vec())))
    }
}
