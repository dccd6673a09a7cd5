//! Persistent HTTP client for the attendance API
//!
//! One reqwest client (connection pool + cookie jar) is shared by every
//! case in a run, so session state set by one call is visible to the next.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde_json::Value;

use crate::common::{join_url, Error, Result};

/// A completed HTTP exchange: status code plus the raw body text
///
/// The body is decoded lazily, since cases only inspect it for the status
/// codes they expect.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// Endpoint path the request was sent to, for error messages
    pub endpoint: String,
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(endpoint: &str, status: u16, body: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            status,
            body: body.into(),
        }
    }

    /// Decode the body as untyped JSON
    pub fn json(&self) -> Result<Value> {
        serde_json::from_str(&self.body).map_err(|e| Error::invalid_body(&self.endpoint, e))
    }
}

/// Transport the cases send their requests through
#[async_trait]
pub trait ApiTransport: Send + Sync {
    /// Base URL that endpoint paths are joined onto, without a trailing slash
    fn base_url(&self) -> &str;

    async fn get(&self, path: &str) -> Result<ApiResponse>;

    async fn post(&self, path: &str, body: &Value) -> Result<ApiResponse>;
}

/// reqwest-backed transport
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client for `base_url`
    ///
    /// `timeout` bounds each request end to end; `None` waits indefinitely.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let url = reqwest::Url::parse(base_url).map_err(|e| Error::invalid_url(base_url, e))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::invalid_url(
                base_url,
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }

        let mut builder = reqwest::Client::builder().cookie_store(true);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn send(&self, path: &str, request: reqwest::RequestBuilder) -> Result<ApiResponse> {
        let started = Instant::now();
        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        tracing::debug!(
            path,
            status,
            elapsed_ms = started.elapsed().as_millis() as u64,
            bytes = body.len(),
            "response received"
        );

        Ok(ApiResponse::new(path, status, body))
    }
}

#[async_trait]
impl ApiTransport for ApiClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get(&self, path: &str) -> Result<ApiResponse> {
        let url = join_url(&self.base_url, path);
        tracing::debug!(%url, "GET");
        self.send(path, self.http.get(&url)).await
    }

    async fn post(&self, path: &str, body: &Value) -> Result<ApiResponse> {
        let url = join_url(&self.base_url, path);
        tracing::debug!(%url, "POST");
        self.send(path, self.http.post(&url).json(body)).await
    }
}
