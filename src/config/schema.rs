//! Configuration schema definitions.
//!
//! Every section has defaults, so an absent or partial config file is valid.
//! All types derive Serde traits for deserialization from TOML.

use serde::{Deserialize, Serialize};

use crate::chains::ChainConfig;

/// Root configuration for the example drivers.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Smart-wallet relay endpoints and polling.
    pub relay: RelayConfig,

    /// Chain RPC settings shared by every network.
    pub rpc: RpcConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Extra networks, or replacements for builtin ones with the same key.
    pub chains: Vec<ChainConfig>,
}

/// Relay service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RelayConfig {
    /// JSON-RPC endpoint accepting `wallet_prepareCalls` / `wallet_sendPreparedCalls`.
    pub rpc_url: String,

    /// Base URL of the task status API (`<status_url>/tasks/status/<id>`).
    pub status_url: String,

    /// Timeout for a single relay HTTP request in seconds.
    pub request_timeout_secs: u64,

    /// First delay between task status polls in milliseconds.
    pub poll_interval_ms: u64,

    /// Upper bound for the poll delay in milliseconds.
    pub max_poll_interval_ms: u64,

    /// Give up waiting for a task after this many seconds.
    pub task_timeout_secs: u64,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            rpc_url: "https://api.gelato.digital/smartwallet".to_string(),
            status_url: "https://api.gelato.digital".to_string(),
            request_timeout_secs: 30,
            poll_interval_ms: 1000,
            max_poll_interval_ms: 5000,
            task_timeout_secs: 180,
        }
    }
}

/// Chain RPC configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RpcConfig {
    /// RPC request timeout in seconds.
    pub timeout_secs: u64,

    /// Number of block confirmations required for plain transactions.
    pub confirmation_blocks: u32,

    /// Maximum time to wait for a transaction receipt in seconds.
    pub receipt_timeout_secs: u64,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            confirmation_blocks: 1,
            receipt_timeout_secs: 120,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` takes precedence.
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
