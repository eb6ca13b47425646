//! HTTP transport for the Instagram API
//!
//! This module provides a trait-based HTTP client that can be easily mocked for testing.

use async_trait::async_trait;
use std::time::Duration;

use super::error::TransportError;
use super::request::ApiRequest;

/// Trait for executing API requests
///
/// The single place where network I/O happens. Implementations do not retry.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Sends the request and returns the raw response
    ///
    /// Non-2xx statuses are returned as data; only a failed round trip or an
    /// empty body is an error.
    async fn send(&self, request: &ApiRequest) -> Result<HttpResponse, TransportError>;
}

/// Response from an HTTP request
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    /// Returns true if status is in 2xx range
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Returns true if status is 401
    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }
}

/// Production HTTP client using reqwest
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    inner: reqwest::Client,
}

impl ReqwestClient {
    /// Creates a new reqwest-based HTTP client without a timeout
    pub fn new() -> Self {
        Self {
            inner: reqwest::Client::new(),
        }
    }

    /// Creates a client that gives up on a round trip after `timeout`
    pub fn with_timeout(timeout: Duration) -> Result<Self, TransportError> {
        let inner = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { inner })
    }
}

impl Default for ReqwestClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn send(&self, request: &ApiRequest) -> Result<HttpResponse, TransportError> {
        let response = self
            .inner
            .request(request.verb.into(), request.full_url())
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        let response = HttpResponse { status, body };

        // Error statuses carry their meaning in the status code alone
        if response.is_success() && response.body.trim().is_empty() {
            return Err(TransportError::EmptyBody { status });
        }

        Ok(response)
    }
}
