//! The `HttpTransport` trait: the seam between the executor and the network.

use async_trait::async_trait;

use crate::error::TransportError;
use crate::request::{HttpRequest, HttpResponse};

/// Sends one request and returns the fully read response.
///
/// Implementations must read the whole body before returning so the
/// underlying connection can be reused, and must not retry.
///
/// # Thread Safety
/// Implementations must be `Send + Sync`; a single transport serves
/// concurrent calls and is stored as `Arc<dyn HttpTransport>`.
#[async_trait]
pub trait HttpTransport: Send + Sync + 'static {
    async fn send(&self, req: &HttpRequest) -> Result<HttpResponse, TransportError>;

    /// Identifier used in logs.
    fn name(&self) -> &str;
}
