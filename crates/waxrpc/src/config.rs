//! Declarative SDK configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use waxrpc_core::config::{empty_option, with_global_timeout, with_proxies, HttpOption};

/// Serializable form of the SDK settings, e.g. loaded from a TOML file.
///
/// ```toml
/// node_url   = "https://wax.greymass.com"
/// proxies    = ["10.0.0.1:3128", "10.0.0.2:3128"]
/// timeout_ms = 10000
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SdkConfig {
    /// Base URL of the chain node; a trailing slash is ignored.
    #[serde(default)]
    pub node_url: String,
    /// Proxy addresses; empty means direct connections.
    #[serde(default)]
    pub proxies: Vec<String>,
    /// Client-wide request timeout in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

impl SdkConfig {
    pub fn new(node_url: impl Into<String>) -> Self {
        Self {
            node_url: node_url.into(),
            ..Self::default()
        }
    }

    /// The equivalent ordered option list.
    pub fn options(&self) -> Vec<HttpOption> {
        let timeout = match self.timeout_ms {
            Some(ms) => with_global_timeout(Duration::from_millis(ms)),
            None => empty_option(),
        };
        vec![with_proxies(self.proxies.clone()), timeout]
    }
}
