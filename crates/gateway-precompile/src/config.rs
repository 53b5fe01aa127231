//! Gateway configuration and precompile activation
//!
//! A [`GatewayConfig`] is read from the chain's upgrade file (JSON, where the
//! activation time is `blockTimestamp`) or from a TOML file. It produces the
//! [`StorageGatewayConfig`] a host registers at [`STORAGE_GATEWAY_ADDRESS`].

use crate::context::{BlockContext, ChainConfig};
use crate::dispatcher::Dispatcher;
use crate::error::ConfigError;
use crate::fetch::ContentFetcher;
use crate::handler::{sanitize_identifier, GatewaySettings};
use crate::recipient::{set_recipient, INITIAL_RECIPIENT};
use crate::selector::SelectorTable;
use crate::STORAGE_GATEWAY_ADDRESS;
use gateway_primitives::Address;
use gateway_state::StateDb;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Largest `max_response_bytes` a config may set (64 MiB)
pub const MAX_RESPONSE_BYTES_LIMIT: usize = 64 * 1024 * 1024;

/// Gateway configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Activation time; `None` leaves the precompile disabled
    #[serde(
        rename = "blockTimestamp",
        alias = "block_timestamp",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub block_timestamp: Option<u64>,
    /// URL scheme including `://`
    #[serde(default = "default_gateway_scheme")]
    pub gateway_scheme: String,
    /// Gateway host suffix
    #[serde(default = "default_gateway_suffix")]
    pub gateway_suffix: String,
    /// Identifier served by `getDataByKey`
    #[serde(default = "default_fixed_cid")]
    pub fixed_cid: String,
    /// Path used when a call names none
    #[serde(default = "default_path")]
    pub default_path: String,
    /// Fetch deadline in milliseconds
    #[serde(default = "default_fetch_timeout_ms")]
    pub fetch_timeout_ms: u64,
    /// Largest accepted response body
    #[serde(default = "default_max_response_bytes")]
    pub max_response_bytes: usize,
}

fn default_gateway_scheme() -> String {
    "https://".to_string()
}

fn default_gateway_suffix() -> String {
    ".ipfs.dweb.link".to_string()
}

fn default_fixed_cid() -> String {
    "bafybeie5nqv6kd3qnfjupgvz34woh3oksc3iau6abmyajn7qvtf6d2ho34".to_string()
}

fn default_path() -> String {
    "/readme".to_string()
}

fn default_fetch_timeout_ms() -> u64 {
    10_000
}

fn default_max_response_bytes() -> usize {
    1024 * 1024
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            block_timestamp: None,
            gateway_scheme: default_gateway_scheme(),
            gateway_suffix: default_gateway_suffix(),
            fixed_cid: default_fixed_cid(),
            default_path: default_path(),
            fetch_timeout_ms: default_fetch_timeout_ms(),
            max_response_bytes: default_max_response_bytes(),
        }
    }
}

impl GatewayConfig {
    /// Parse from TOML
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Parse from JSON
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Load from a `.toml` or `.json` file and validate
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_str(&content)?,
            Some("json") => Self::from_json_str(&content)?,
            _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        };
        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded gateway config");
        Ok(config)
    }

    /// Serialize to TOML
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Reject settings that cannot produce a well-formed target URL
    pub fn validate(&self) -> Result<(), ConfigError> {
        let scheme = self.gateway_scheme.strip_suffix("://").unwrap_or_default();
        if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ConfigError::Invalid(format!(
                "gateway_scheme must look like \"https://\", got {:?}",
                self.gateway_scheme
            )));
        }
        if !self.gateway_suffix.starts_with('.') || self.gateway_suffix.len() < 2 {
            return Err(ConfigError::Invalid(format!(
                "gateway_suffix must start with '.', got {:?}",
                self.gateway_suffix
            )));
        }
        match sanitize_identifier(&self.fixed_cid) {
            Ok(cid) if cid == self.fixed_cid => {}
            _ => {
                return Err(ConfigError::Invalid(format!(
                    "fixed_cid must be non-empty and alphanumeric, got {:?}",
                    self.fixed_cid
                )))
            }
        }
        if !self.default_path.starts_with('/') {
            return Err(ConfigError::Invalid(format!(
                "default_path must start with '/', got {:?}",
                self.default_path
            )));
        }
        if self.fetch_timeout_ms == 0 {
            return Err(ConfigError::Invalid("fetch_timeout_ms must be positive".into()));
        }
        if self.max_response_bytes == 0 || self.max_response_bytes > MAX_RESPONSE_BYTES_LIMIT {
            return Err(ConfigError::Invalid(format!(
                "max_response_bytes must be in 1..={}, got {}",
                MAX_RESPONSE_BYTES_LIMIT, self.max_response_bytes
            )));
        }
        Ok(())
    }

    /// Handler settings derived from this config
    pub fn settings(&self) -> GatewaySettings {
        GatewaySettings {
            scheme: self.gateway_scheme.clone(),
            gateway_suffix: self.gateway_suffix.clone(),
            fixed_cid: self.fixed_cid.clone(),
            default_path: self.default_path.clone(),
            fetch_timeout: Duration::from_millis(self.fetch_timeout_ms),
        }
    }
}

/// A precompile the host installs at a fixed address once its activation
/// time is reached
pub trait StatefulPrecompileConfig: Send + Sync {
    /// Address the precompile is installed at
    fn address(&self) -> Address;

    /// Activation timestamp, `None` when disabled
    fn timestamp(&self) -> Option<u64>;

    /// Write the precompile's initial state
    fn configure(&self, chain: &ChainConfig, state: &mut dyn StateDb, block: &BlockContext);

    /// Dispatcher serving calls to [`address`](Self::address)
    fn contract(&self) -> &Dispatcher;
}

/// Activation config of the storage gateway
#[derive(Debug, Clone)]
pub struct StorageGatewayConfig {
    config: GatewayConfig,
    contract: Dispatcher,
}

impl StorageGatewayConfig {
    /// Validate `config` and build the dispatcher around `fetcher`
    pub fn new(config: GatewayConfig, fetcher: Arc<dyn ContentFetcher>) -> Result<Self, ConfigError> {
        config.validate()?;
        let contract = Dispatcher::new(
            SelectorTable::storage_gateway()?,
            fetcher,
            config.settings(),
        );
        Ok(Self { config, contract })
    }

    /// Build with a live [`HttpFetcher`](crate::fetch::HttpFetcher)
    #[cfg(feature = "http")]
    pub fn with_http(config: GatewayConfig) -> Result<Self, ConfigError> {
        let fetcher = crate::fetch::HttpFetcher::new(config.max_response_bytes)?;
        Self::new(config, Arc::new(fetcher))
    }

    /// Underlying config
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}

impl StatefulPrecompileConfig for StorageGatewayConfig {
    fn address(&self) -> Address {
        STORAGE_GATEWAY_ADDRESS
    }

    fn timestamp(&self) -> Option<u64> {
        self.config.block_timestamp
    }

    fn configure(&self, chain: &ChainConfig, state: &mut dyn StateDb, block: &BlockContext) {
        set_recipient(state, INITIAL_RECIPIENT);
        tracing::info!(
            address = %STORAGE_GATEWAY_ADDRESS,
            chain_id = chain.chain_id,
            block = block.number,
            timestamp = block.timestamp,
            "storage gateway activated"
        );
    }

    fn contract(&self) -> &Dispatcher {
        &self.contract
    }
}

fn is_forked(activation: Option<u64>, head: Option<u64>) -> bool {
    matches!((activation, head), (Some(activation), Some(head)) if activation <= head)
}

/// Whether `current` is the first timestamp at or after `activation`.
///
/// A missing parent (genesis) counts as not yet activated.
pub fn is_fork_transition(activation: Option<u64>, parent: Option<u64>, current: u64) -> bool {
    !is_forked(activation, parent) && is_forked(activation, Some(current))
}

/// Run `configure` if this block activates the precompile. Returns whether
/// it ran.
pub fn check_configure(
    config: &dyn StatefulPrecompileConfig,
    chain: &ChainConfig,
    parent_timestamp: Option<u64>,
    block: &BlockContext,
    state: &mut dyn StateDb,
) -> bool {
    if !is_fork_transition(config.timestamp(), parent_timestamp, block.timestamp) {
        return false;
    }
    config.configure(chain, state, block);
    true
}
