//! HTTP wire types shared by the executor and every transport.

use std::fmt;

use url::Url;

use crate::error::SdkError;

pub const CONTENT_TYPE_JSON: &str = "application/json";

/// HTTP methods the node API uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single outgoing request. Built per call and owned by that call.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    method: Method,
    raw_url: String,
    url: Url,
    body: Option<Vec<u8>>,
    headers: Vec<(&'static str, &'static str)>,
}

impl HttpRequest {
    /// Build a request with the JSON content type set.
    ///
    /// Fails with [`SdkError::Build`] if `url` does not parse.
    pub fn new(method: Method, url: &str) -> Result<Self, SdkError> {
        let parsed = Url::parse(url).map_err(|e| SdkError::build(format!("invalid url {url:?}"), e))?;
        Ok(Self {
            method,
            raw_url: url.to_string(),
            url: parsed,
            body: None,
            headers: vec![("Content-Type", CONTENT_TYPE_JSON)],
        })
    }

    /// Attach a request body.
    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The URL exactly as the caller passed it, before normalization.
    pub fn raw_url(&self) -> &str {
        &self.raw_url
    }

    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    pub fn headers(&self) -> &[(&'static str, &'static str)] {
        &self.headers
    }
}

/// A fully read response.
///
/// `body` is `None` when the transport produced no body stream at all, which
/// is distinct from an empty body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Option<Vec<u8>>,
}

impl HttpResponse {
    pub fn new(status: u16, body: Vec<u8>) -> Self {
        Self {
            status,
            body: Some(body),
        }
    }

    /// Any 2xx counts as success, not only 200.
    pub fn is_success(&self) -> bool {
        is_success_status(self.status)
    }

    pub fn body_bytes(&self) -> &[u8] {
        self.body.as_deref().unwrap_or_default()
    }
}

pub fn is_success_status(status: u16) -> bool {
    (200..=299).contains(&status)
}
