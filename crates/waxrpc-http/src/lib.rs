//! waxrpc-http: `reqwest` transport for WaxRPC.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use waxrpc_core::{with_global_timeout, ClientConfig, Executor};
//! use waxrpc_http::ReqwestTransport;
//!
//! let config = ClientConfig::from_options([with_global_timeout(Duration::from_secs(10))]).unwrap();
//! let executor = Executor::new(Arc::new(ReqwestTransport::new(&config).unwrap()));
//! ```

pub mod client;

pub use client::ReqwestTransport;
