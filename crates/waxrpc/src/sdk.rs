//! The `Sdk` handle: typed chain queries over the shared executor.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use waxrpc_core::config::{ClientConfig, HttpOption};
use waxrpc_core::{CallContext, Executor, HttpTransport, SdkError};
use waxrpc_http::ReqwestTransport;

use crate::config::SdkConfig;
use crate::models::{GetInfoResponse, GetTableRowsPayload, TableRowsEnvelope, TableRowsPage};

pub const GET_TABLE_ROWS_ENDPOINT: &str = "/v1/chain/get_table_rows";
pub const GET_INFO_ENDPOINT: &str = "/v1/chain/get_info";

/// Query client for a single chain node.
///
/// Read-only after construction; share it (or clones of it) across tasks.
#[derive(Clone)]
pub struct Sdk {
    node_url: String,
    executor: Executor,
}

impl Sdk {
    /// Build an SDK over `reqwest`, applying `options` in order.
    pub fn new<I>(node_url: impl Into<String>, options: I) -> Result<Self, SdkError>
    where
        I: IntoIterator<Item = HttpOption>,
    {
        let config = ClientConfig::from_options(options)?;
        let transport = ReqwestTransport::new(&config)?;
        Ok(Self::with_transport(node_url, Arc::new(transport)))
    }

    pub fn from_config(config: &SdkConfig) -> Result<Self, SdkError> {
        Self::new(config.node_url.clone(), config.options())
    }

    /// Build an SDK over any transport.
    pub fn with_transport(node_url: impl Into<String>, transport: Arc<dyn HttpTransport>) -> Self {
        let node_url = node_url.into();
        Self {
            node_url: node_url.strip_suffix('/').unwrap_or(&node_url).to_string(),
            executor: Executor::new(transport),
        }
    }

    pub fn node_url(&self) -> &str {
        &self.node_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.node_url, path)
    }

    /// Fetch contract table rows and decode them into `T` (typically a `Vec`
    /// of the row type).
    ///
    /// Fails with [`SdkError::NoTableRows`] when the query matches nothing.
    pub async fn get_table_rows_with_context<T: DeserializeOwned>(
        &self,
        ctx: &CallContext,
        payload: &GetTableRowsPayload,
    ) -> Result<T, SdkError> {
        self.get_table_rows_page_with_context(ctx, payload)
            .await
            .map(|page| page.rows)
    }

    pub async fn get_table_rows<T: DeserializeOwned>(&self, payload: &GetTableRowsPayload) -> Result<T, SdkError> {
        self.get_table_rows_with_context(&CallContext::background(), payload)
            .await
    }

    /// Like [`Sdk::get_table_rows_with_context`], keeping the `more` and
    /// `next_key` pagination fields.
    pub async fn get_table_rows_page_with_context<T: DeserializeOwned>(
        &self,
        ctx: &CallContext,
        payload: &GetTableRowsPayload,
    ) -> Result<TableRowsPage<T>, SdkError> {
        let body = serde_json::to_vec(payload).map_err(SdkError::Encode)?;

        let envelope: TableRowsEnvelope = self
            .executor
            .post(ctx, &self.endpoint(GET_TABLE_ROWS_ENDPOINT), body)
            .await?;

        if envelope.rows.is_empty() {
            tracing::debug!(
                code = %payload.code,
                scope = %payload.scope,
                table = %payload.table,
                "no table rows found"
            );
            return Err(SdkError::NoTableRows);
        }

        let rows = serde_json::from_value(Value::Array(envelope.rows)).map_err(|source| SdkError::Decode {
            stage: "table rows",
            source,
        })?;

        Ok(TableRowsPage {
            rows,
            more: envelope.more,
            next_key: envelope.next_key,
        })
    }

    pub async fn get_table_rows_page<T: DeserializeOwned>(
        &self,
        payload: &GetTableRowsPayload,
    ) -> Result<TableRowsPage<T>, SdkError> {
        self.get_table_rows_page_with_context(&CallContext::background(), payload)
            .await
    }

    /// Fetch the node's chain status.
    pub async fn get_info_with_context(&self, ctx: &CallContext) -> Result<GetInfoResponse, SdkError> {
        self.executor.get(ctx, &self.endpoint(GET_INFO_ENDPOINT)).await
    }

    pub async fn get_info(&self) -> Result<GetInfoResponse, SdkError> {
        self.get_info_with_context(&CallContext::background()).await
    }
}
