//! Error types for the request pipeline.

use std::error::Error as StdError;
use std::fmt;

use thiserror::Error;

use crate::request::{HttpRequest, HttpResponse};

/// Diagnostic snapshot of a failed request.
///
/// `status_code` is `0` when no response was received and `body` is empty
/// when the response carried no readable payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestErrorMessage {
    pub request_url: String,
    pub status_code: u16,
    pub body: String,
}

impl RequestErrorMessage {
    /// Capture the request URL and whatever the response (if any) exposes.
    ///
    /// The body is kept whole, without truncation.
    pub fn describe(req: &HttpRequest, resp: Option<&HttpResponse>) -> Self {
        let mut msg = Self {
            request_url: req.raw_url().to_string(),
            ..Self::default()
        };

        let Some(resp) = resp else {
            return msg;
        };

        msg.status_code = resp.status;
        if let Some(body) = resp.body.as_deref() {
            msg.body = String::from_utf8_lossy(body).into_owned();
        }
        msg
    }
}

impl fmt::Display for RequestErrorMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{request_url: {}, status_code: {}, body: {}}}",
            self.request_url, self.status_code, self.body
        )
    }
}

/// Errors raised by an [`HttpTransport`](crate::transport::HttpTransport)
/// while a call is in flight.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection refused, TLS failure, proxy failure and the like.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The client-wide timeout elapsed.
    #[error("Request timed out after {ms}ms")]
    Timeout { ms: u64 },

    /// A response arrived but its body could not be read.
    #[error("reading response body: {0}")]
    Body(String),

    /// The caller cancelled the call.
    #[error("request cancelled")]
    Cancelled,

    /// The per-call deadline elapsed.
    #[error("request deadline exceeded")]
    DeadlineExceeded,
}

impl TransportError {
    /// Returns `true` for either the client-wide timeout or a per-call deadline.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. } | Self::DeadlineExceeded)
    }
}

/// Every failure a caller of the SDK can observe.
#[derive(Debug, Error)]
pub enum SdkError {
    /// Inputs could not be turned into a request or a client. Nothing was sent.
    #[error("creating request: {context}")]
    Build {
        context: String,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    /// The payload could not be serialized.
    #[error("marshalling payload: {0}")]
    Encode(#[source] serde_json::Error),

    /// The call did not complete.
    #[error("performing request: {0}")]
    Transport(#[from] TransportError),

    /// A response arrived with a status outside `200..=299`.
    #[error("got unexpected status code. Details: {0}")]
    UnexpectedStatus(RequestErrorMessage),

    /// Status was fine but the body did not match the expected shape.
    #[error("unmarshalling {stage}: {source}")]
    Decode {
        stage: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The table query succeeded but matched nothing.
    #[error("no table rows found")]
    NoTableRows,
}

impl SdkError {
    /// A [`SdkError::Build`] wrapping the underlying parse or builder error.
    pub fn build<E>(context: impl Into<String>, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::Build {
            context: context.into(),
            source: Box::new(source),
        }
    }

    pub fn is_no_rows(&self) -> bool {
        matches!(self, Self::NoTableRows)
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Transport(TransportError::Cancelled))
    }

    /// The captured request/response details, for unexpected-status failures.
    pub fn request_error(&self) -> Option<&RequestErrorMessage> {
        match self {
            Self::UnexpectedStatus(msg) => Some(msg),
            _ => None,
        }
    }
}
