//! Request and response shapes for the chain API.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Body of `POST /v1/chain/get_table_rows`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetTableRowsPayload {
    pub json: bool,
    pub code: String,
    pub scope: String,
    pub table: String,
    pub lower_bound: String,
    pub upper_bound: String,
    pub index_position: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_type: Option<String>,
    pub limit: String,
}

impl GetTableRowsPayload {
    /// Query `table` of contract `code` in `scope`, asking the node to
    /// decode rows as JSON.
    pub fn new(code: impl Into<String>, scope: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            json: true,
            code: code.into(),
            scope: scope.into(),
            table: table.into(),
            ..Self::default()
        }
    }

    pub fn bounds(mut self, lower: impl Into<String>, upper: impl Into<String>) -> Self {
        self.lower_bound = lower.into();
        self.upper_bound = upper.into();
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit.to_string();
        self
    }

    pub fn index_position(mut self, position: i64) -> Self {
        self.index_position = position;
        self
    }

    pub fn key_type(mut self, key_type: impl Into<String>) -> Self {
        self.key_type = Some(key_type.into());
        self
    }
}

/// Raw `get_table_rows` envelope. Row shape is left to the caller.
///
/// A `null` or missing `rows` reads as empty. The pagination hints never
/// fail the decode: anything unexpected falls back to "no more rows".
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct TableRowsEnvelope {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub rows: Vec<Value>,
    #[serde(default, deserialize_with = "lenient_more")]
    pub more: bool,
    #[serde(default, deserialize_with = "lenient_next_key")]
    pub next_key: String,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Value>, D::Error> {
    Ok(Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_more<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(matches!(Value::deserialize(deserializer)?, Value::Bool(true)))
}

// Older nodes send numeric keys.
fn lenient_next_key<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(key) => key,
        Value::Number(key) => key.to_string(),
        _ => String::new(),
    })
}

/// Decoded rows plus the node's pagination hints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRowsPage<T> {
    pub rows: T,
    /// More rows exist past this page.
    pub more: bool,
    /// Lower bound to pass for the next page; empty when the node omits it.
    pub next_key: String,
}

/// Response of `GET /v1/chain/get_info`.
///
/// Fields the node does not send (older releases omit the last two) decode
/// as zero values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GetInfoResponse {
    pub server_version: String,
    pub chain_id: String,
    pub head_block_num: u64,
    pub last_irreversible_block_num: u64,
    pub last_irreversible_block_id: String,
    pub head_block_id: String,
    pub head_block_time: String,
    pub head_block_producer: String,
    pub virtual_block_cpu_limit: u64,
    pub virtual_block_net_limit: u64,
    pub block_cpu_limit: u64,
    pub block_net_limit: u64,
    pub server_version_string: String,
    pub fork_db_head_block_num: u64,
    pub fork_db_head_block_id: String,
    pub server_full_version_string: String,
    pub last_irreversible_block_time: String,
}
