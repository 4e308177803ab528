//! Client options, applied in order at construction time.
//!
//! ```rust
//! use std::time::Duration;
//! use waxrpc_core::config::{empty_option, with_global_timeout, with_proxies, ClientConfig};
//!
//! let config = ClientConfig::from_options([
//!     with_proxies(["10.0.0.1:3128", "10.0.0.2:3128"]),
//!     with_global_timeout(Duration::from_secs(10)),
//!     empty_option(),
//! ])
//! .unwrap();
//! assert_eq!(config.timeout, Some(Duration::from_secs(10)));
//! ```

use std::time::Duration;

use rand::Rng;
use url::Url;

use crate::error::SdkError;

/// A single configuration step. Later options override earlier ones on the
/// same field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpOption {
    /// Route each request through a proxy picked at random from the pool.
    /// An empty pool changes nothing.
    Proxies(Vec<String>),
    /// Deadline applied to every request made by the client.
    GlobalTimeout(Duration),
    /// Changes nothing.
    Empty,
}

/// Pick a random proxy per request from `pool`. `None` or an empty pool is a
/// no-op.
pub fn with_proxies<I, S>(pool: I) -> HttpOption
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    HttpOption::Proxies(pool.into_iter().map(Into::into).collect())
}

/// Set the client-wide timeout. Per-call deadlines can only shorten it.
pub fn with_global_timeout(timeout: Duration) -> HttpOption {
    HttpOption::GlobalTimeout(timeout)
}

/// Identity option, for conditionally building option lists.
pub fn empty_option() -> HttpOption {
    HttpOption::Empty
}

/// Non-empty set of proxy addresses with uniform random selection.
///
/// No affinity between requests, no health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyPool {
    proxies: Vec<Url>,
}

impl ProxyPool {
    /// Parse every address; entries without a scheme default to `https`.
    /// Returns `Ok(None)` for an empty pool.
    pub fn parse(addrs: &[String]) -> Result<Option<Self>, SdkError> {
        if addrs.is_empty() {
            return Ok(None);
        }
        let proxies = addrs
            .iter()
            .map(|addr| parse_proxy(addr))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Some(Self { proxies }))
    }

    pub fn len(&self) -> usize {
        self.proxies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.proxies.is_empty()
    }

    pub fn proxies(&self) -> &[Url] {
        &self.proxies
    }

    /// Pick one proxy, independently of any previous pick.
    pub fn pick(&self) -> &Url {
        let idx = rand::thread_rng().gen_range(0..self.proxies.len());
        &self.proxies[idx]
    }
}

fn parse_proxy(addr: &str) -> Result<Url, SdkError> {
    let addr = addr.trim();
    let raw = if addr.contains("://") {
        addr.to_string()
    } else {
        format!("https://{addr}")
    };
    let url = Url::parse(&raw).map_err(|e| SdkError::build(format!("invalid proxy {addr:?}"), e))?;
    if url.host_str().is_none() {
        return Err(SdkError::build(format!("invalid proxy {addr:?}"), url::ParseError::EmptyHost));
    }
    Ok(url)
}

/// Transport settings, fixed once the SDK is built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientConfig {
    pub proxies: Option<ProxyPool>,
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    /// Apply `options` left to right onto the default configuration.
    pub fn from_options<I>(options: I) -> Result<Self, SdkError>
    where
        I: IntoIterator<Item = HttpOption>,
    {
        let mut config = Self::default();
        for option in options {
            config.apply(option)?;
        }
        Ok(config)
    }

    pub fn apply(&mut self, option: HttpOption) -> Result<(), SdkError> {
        match option {
            HttpOption::Proxies(addrs) => {
                if let Some(pool) = ProxyPool::parse(&addrs)? {
                    self.proxies = Some(pool);
                }
            }
            HttpOption::GlobalTimeout(timeout) => self.timeout = Some(timeout),
            HttpOption::Empty => {}
        }
        Ok(())
    }
}
