//! waxrpc-core: request pipeline and shared types for WaxRPC.
//!
//! # Overview
//!
//! The core crate owns everything between a typed call and the network:
//!
//! - [`HttpTransport`]: the async trait every transport implements
//! - [`HttpRequest`] / [`HttpResponse`]: wire types
//! - [`Executor`]: send, classify the status (any 2xx succeeds), decode
//! - [`SdkError`] / [`TransportError`] / [`RequestErrorMessage`]: error taxonomy
//! - [`CallContext`]: per-call cancellation and deadline
//! - [`config`] module: ordered client options (proxy pool, global timeout)

pub mod config;
pub mod context;
pub mod error;
pub mod executor;
pub mod request;
pub mod transport;

pub use config::{empty_option, with_global_timeout, with_proxies, ClientConfig, HttpOption, ProxyPool};
pub use context::CallContext;
pub use error::{RequestErrorMessage, SdkError, TransportError};
pub use executor::Executor;
pub use request::{HttpRequest, HttpResponse, Method};
pub use transport::HttpTransport;
pub use tokio_util::sync::CancellationToken;
