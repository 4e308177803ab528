//! waxrpc: query client for WAX / Antelope chain nodes.
//!
//! Two operations over the node's HTTP JSON API:
//! - [`Sdk::get_table_rows`]: contract table rows, decoded into any row type
//! - [`Sdk::get_info`]: chain status snapshot
//!
//! Each has a `*_with_context` variant taking a [`CallContext`] for
//! cancellation and per-call deadlines.
//!
//! # Quick start
//! ```rust,no_run
//! use std::time::Duration;
//! use serde::Deserialize;
//! use waxrpc::{with_global_timeout, GetTableRowsPayload, Sdk, SdkError};
//!
//! #[derive(Deserialize)]
//! struct Account {
//!     balance: String,
//! }
//!
//! # async fn run() -> Result<(), SdkError> {
//! let sdk = Sdk::new("https://wax.greymass.com/", [with_global_timeout(Duration::from_secs(10))])?;
//!
//! let info = sdk.get_info().await?;
//! println!("head block {}", info.head_block_num);
//!
//! let payload = GetTableRowsPayload::new("eosio.token", "alice", "accounts").limit(10);
//! match sdk.get_table_rows::<Vec<Account>>(&payload).await {
//!     Ok(rows) => println!("{} balances", rows.len()),
//!     Err(SdkError::NoTableRows) => println!("no balances"),
//!     Err(e) => return Err(e),
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod models;
pub mod sdk;

pub use config::SdkConfig;
pub use models::{GetInfoResponse, GetTableRowsPayload, TableRowsPage};
pub use sdk::{Sdk, GET_INFO_ENDPOINT, GET_TABLE_ROWS_ENDPOINT};

pub use waxrpc_core::{
    empty_option, with_global_timeout, with_proxies, CallContext, CancellationToken, HttpOption, RequestErrorMessage,
    SdkError, TransportError,
};
