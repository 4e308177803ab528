//! Per-call cancellation and deadlines.

use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error::TransportError;

/// Cancellation signal plus an optional deadline, passed to every call.
///
/// A per-call deadline only ever shortens the client-wide timeout: both run,
/// and whichever fires first ends the call.
#[derive(Debug, Clone, Default)]
pub struct CallContext {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl CallContext {
    /// Never cancelled, no deadline.
    pub fn background() -> Self {
        Self::default()
    }

    /// Cancelled whenever `token` is.
    pub fn with_cancel(token: CancellationToken) -> Self {
        Self {
            token,
            deadline: None,
        }
    }

    /// Expires `timeout` from now.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::background().timeout(timeout)
    }

    /// Add (or tighten) a deadline `timeout` from now. An earlier existing
    /// deadline is kept.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        let candidate = Instant::now() + timeout;
        self.deadline = Some(match self.deadline {
            Some(existing) => existing.min(candidate),
            None => candidate,
        });
        self
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Resolves once the call must stop, with the reason.
    pub async fn done(&self) -> TransportError {
        match self.deadline {
            Some(deadline) => tokio::select! {
                _ = self.token.cancelled() => TransportError::Cancelled,
                _ = tokio::time::sleep_until(deadline) => TransportError::DeadlineExceeded,
            },
            None => {
                self.token.cancelled().await;
                TransportError::Cancelled
            }
        }
    }
}
