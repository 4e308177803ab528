//! Request executor: send, classify the status, decode.
//!
//! One attempt per call. The body is read in full before the status is
//! judged so that failures can carry it.

use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::context::CallContext;
use crate::error::{RequestErrorMessage, SdkError};
use crate::request::{HttpRequest, HttpResponse, Method};
use crate::transport::HttpTransport;

/// Runs requests through a shared transport. Cheap to clone.
#[derive(Clone)]
pub struct Executor {
    transport: Arc<dyn HttpTransport>,
}

impl Executor {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &Arc<dyn HttpTransport> {
        &self.transport
    }

    /// GET `url` and decode the JSON response into `T`.
    pub async fn get<T: DeserializeOwned>(&self, ctx: &CallContext, url: &str) -> Result<T, SdkError> {
        let req = HttpRequest::new(Method::Get, url)?;
        self.execute(ctx, req).await
    }

    /// POST `body` (already JSON-encoded) to `url` and decode the response into `T`.
    pub async fn post<T: DeserializeOwned>(
        &self,
        ctx: &CallContext,
        url: &str,
        body: Vec<u8>,
    ) -> Result<T, SdkError> {
        let req = HttpRequest::new(Method::Post, url)?.with_body(body);
        self.execute(ctx, req).await
    }

    /// Send `req` and decode a 2xx body into `T`.
    pub async fn execute<T: DeserializeOwned>(&self, ctx: &CallContext, req: HttpRequest) -> Result<T, SdkError> {
        let resp = self.send(ctx, &req).await?;

        if !resp.is_success() {
            let msg = RequestErrorMessage::describe(&req, Some(&resp));
            tracing::warn!(
                status = msg.status_code,
                url = %msg.request_url,
                "unexpected status code"
            );
            return Err(SdkError::UnexpectedStatus(msg));
        }

        serde_json::from_slice(resp.body_bytes()).map_err(|source| {
            tracing::debug!(url = %req.url(), error = %source, "failed to decode response body");
            SdkError::Decode {
                stage: "response body",
                source,
            }
        })
    }

    /// Race the transport against the call context. The transport future is
    /// dropped as soon as the context fires.
    async fn send(&self, ctx: &CallContext, req: &HttpRequest) -> Result<HttpResponse, SdkError> {
        tracing::debug!(
            method = %req.method(),
            url = %req.url(),
            transport = self.transport.name(),
            "sending request"
        );

        tokio::select! {
            biased;
            reason = ctx.done() => {
                tracing::debug!(url = %req.url(), reason = %reason, "request aborted");
                Err(SdkError::Transport(reason))
            }
            res = self.transport.send(req) => res.map_err(SdkError::Transport),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use serde::Deserialize;
    use tokio_util::sync::CancellationToken;

    use super::*;
    use crate::error::TransportError;

    const URL: &str = "http://node.test/v1/chain/get_info";

    #[derive(Debug, Default, PartialEq, Deserialize)]
    struct FakeDest {
        #[serde(rename = "Name")]
        name: String,
        #[serde(rename = "Age")]
        age: i64,
    }

    struct MockTransport {
        status: u16,
        body: Option<Vec<u8>>,
        delay: Option<Duration>,
        calls: AtomicUsize,
    }

    impl MockTransport {
        fn new(status: u16, body: &str) -> Self {
            Self {
                status,
                body: Some(body.as_bytes().to_vec()),
                delay: None,
                calls: AtomicUsize::new(0),
            }
        }

        fn slow(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }
    }

    #[async_trait]
    impl HttpTransport for MockTransport {
        async fn send(&self, _req: &HttpRequest) -> Result<HttpResponse, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            Ok(HttpResponse {
                status: self.status,
                body: self.body.clone(),
            })
        }

        fn name(&self) -> &str {
            "mock"
        }
    }

    struct FailingTransport;

    #[async_trait]
    impl HttpTransport for FailingTransport {
        async fn send(&self, _req: &HttpRequest) -> Result<HttpResponse, TransportError> {
            Err(TransportError::Http("connection refused".into()))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    fn executor(transport: MockTransport) -> (Executor, Arc<MockTransport>) {
        let transport = Arc::new(transport);
        (Executor::new(transport.clone()), transport)
    }

    #[tokio::test]
    async fn decodes_ok_body() {
        let (exec, _) = executor(MockTransport::new(200, r#"{"Name":"Alex","Age":30}"#));
        let dest: FakeDest = exec.get(&CallContext::background(), URL).await.unwrap();
        assert_eq!(
            dest,
            FakeDest {
                name: "Alex".into(),
                age: 30
            }
        );
    }

    #[tokio::test]
    async fn every_2xx_decodes() {
        for status in [200, 201, 202, 204, 226, 299] {
            let (exec, _) = executor(MockTransport::new(status, r#"{"Name":"Alex","Age":30}"#));
            let dest: FakeDest = exec.get(&CallContext::background(), URL).await.unwrap();
            assert_eq!(dest.age, 30, "status {status}");
        }
    }

    #[tokio::test]
    async fn bad_request_carries_url_status_and_body() {
        let body = r#"{"Name":"","Age":0}"#;
        let (exec, _) = executor(MockTransport::new(400, body));
        let err = exec
            .get::<FakeDest>(&CallContext::background(), URL)
            .await
            .unwrap_err();

        assert_eq!(
            err.request_error(),
            Some(&RequestErrorMessage {
                request_url: URL.into(),
                status_code: 400,
                body: body.into(),
            })
        );
    }

    #[tokio::test]
    async fn non_2xx_is_unexpected_status() {
        for status in [100, 199, 300, 302, 404, 500, 503] {
            let (exec, _) = executor(MockTransport::new(status, "nope"));
            let err = exec
                .get::<FakeDest>(&CallContext::background(), URL)
                .await
                .unwrap_err();
            let msg = err.request_error().expect("unexpected status");
            assert_eq!(msg.status_code, status);
            assert_eq!(msg.body, "nope");
        }
    }

    #[tokio::test]
    async fn failure_without_body_has_empty_body() {
        let transport = MockTransport {
            body: None,
            ..MockTransport::new(502, "")
        };
        let (exec, _) = executor(transport);
        let err = exec
            .get::<FakeDest>(&CallContext::background(), URL)
            .await
            .unwrap_err();
        assert_eq!(err.request_error().unwrap().body, "");
    }

    #[tokio::test]
    async fn malformed_body_is_decode_error() {
        let (exec, _) = executor(MockTransport::new(200, "<html>"));
        let err = exec
            .get::<FakeDest>(&CallContext::background(), URL)
            .await
            .unwrap_err();
        assert!(matches!(err, SdkError::Decode { stage: "response body", .. }), "{err}");
    }

    #[tokio::test]
    async fn transport_failure_is_passed_through() {
        let exec = Executor::new(Arc::new(FailingTransport));
        let err = exec
            .post::<FakeDest>(&CallContext::background(), URL, b"{}".to_vec())
            .await
            .unwrap_err();
        assert!(matches!(err, SdkError::Transport(TransportError::Http(_))));
    }

    #[tokio::test]
    async fn invalid_url_never_reaches_transport() {
        let (exec, transport) = executor(MockTransport::new(200, "{}"));
        let err = exec
            .get::<FakeDest>(&CallContext::background(), "::not a url::")
            .await
            .unwrap_err();
        assert!(matches!(err, SdkError::Build { .. }));
        assert_eq!(transport.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn single_attempt_per_call() {
        let (exec, transport) = executor(MockTransport::new(500, "down"));
        let _ = exec.get::<FakeDest>(&CallContext::background(), URL).await;
        assert_eq!(transport.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn cancel_aborts_slow_call() {
        let (exec, _) = executor(MockTransport::new(200, r#"{"Name":"Alex","Age":30}"#).slow(Duration::from_secs(30)));
        let token = CancellationToken::new();
        let ctx = CallContext::with_cancel(token.clone());

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            token.cancel();
        });

        let started = std::time::Instant::now();
        let err = exec.get::<FakeDest>(&ctx, URL).await.unwrap_err();
        assert!(err.is_cancelled(), "{err}");
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn already_cancelled_context_skips_decode() {
        let (exec, _) = executor(MockTransport::new(200, r#"{"Name":"Alex","Age":30}"#));
        let ctx = CallContext::background();
        ctx.cancel();
        let err = exec.get::<FakeDest>(&ctx, URL).await.unwrap_err();
        assert!(err.is_cancelled());
    }

    #[tokio::test]
    async fn per_call_deadline_fires() {
        let (exec, _) = executor(MockTransport::new(200, "{}").slow(Duration::from_secs(30)));
        let ctx = CallContext::with_timeout(Duration::from_millis(20));
        let err = exec.get::<serde_json::Value>(&ctx, URL).await.unwrap_err();
        assert!(matches!(err, SdkError::Transport(TransportError::DeadlineExceeded)));
    }
}
