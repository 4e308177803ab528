//! HTTP transport backed by `reqwest`.
//!
//! Features:
//! - Client-wide timeout from [`ClientConfig::timeout`]
//! - Random per-request proxy from [`ClientConfig::proxies`]
//! - Connection pooling (bodies are always read to the end)
//!
//! No retry, no backoff: every `send` is exactly one HTTP exchange.

use std::time::Duration;

use async_trait::async_trait;

use waxrpc_core::config::ClientConfig;
use waxrpc_core::error::{SdkError, TransportError};
use waxrpc_core::request::{HttpRequest, HttpResponse, Method};
use waxrpc_core::transport::HttpTransport;

/// [`HttpTransport`] over a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: reqwest::Client,
    timeout: Option<Duration>,
}

impl ReqwestTransport {
    /// Build the underlying client from an already-composed configuration.
    pub fn new(config: &ClientConfig) -> Result<Self, SdkError> {
        let mut builder = reqwest::Client::builder();

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        if let Some(pool) = config.proxies.clone() {
            tracing::debug!(proxies = pool.len(), "routing requests through proxy pool");
            builder = builder.proxy(reqwest::Proxy::custom(move |_| Some(pool.pick().clone())));
        }

        let http = builder
            .build()
            .map_err(|e| SdkError::build("building http client", e))?;

        Ok(Self {
            http,
            timeout: config.timeout,
        })
    }

    /// Client with no proxy and no global timeout.
    pub fn default_client() -> Result<Self, SdkError> {
        Self::new(&ClientConfig::default())
    }

    fn map_err(&self, e: reqwest::Error) -> TransportError {
        if e.is_timeout() {
            let ms = self.timeout.map(|t| t.as_millis() as u64).unwrap_or_default();
            TransportError::Timeout { ms }
        } else {
            TransportError::Http(e.to_string())
        }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, req: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let method = match req.method() {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
        };

        let mut builder = self.http.request(method, req.url().clone());
        for (name, value) in req.headers() {
            builder = builder.header(*name, *value);
        }
        if let Some(body) = req.body() {
            builder = builder.body(body.to_vec());
        }

        let resp = builder.send().await.map_err(|e| self.map_err(e))?;
        let status = resp.status().as_u16();

        let body = resp.bytes().await.map_err(|e| match self.map_err(e) {
            TransportError::Http(msg) => TransportError::Body(msg),
            other => other,
        })?;

        Ok(HttpResponse::new(status, body.to_vec()))
    }

    fn name(&self) -> &str {
        "reqwest"
    }
}
