//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the CLI.
//! All types derive Serde traits for deserialization from config files.
//! Secrets (the signing key) are deliberately absent: they only come from
//! the environment.

use serde::{Deserialize, Serialize};

/// Sepolia chain id.
pub const SEPOLIA_CHAIN_ID: u64 = 11_155_111;

/// Root configuration for the token CLI.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct CliConfig {
    /// Network endpoint and confirmation settings.
    pub network: NetworkConfig,

    /// Deployed token contract settings.
    pub token: TokenConfig,

    /// Transfer history query settings.
    pub history: HistoryConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Network configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Human readable network name.
    pub name: String,

    /// Chain ID the contract is deployed on.
    pub chain_id: u64,

    /// Explicit JSON-RPC endpoint URL. When unset the endpoint is derived
    /// from provider API keys or the public fallback.
    pub rpc_url: Option<String>,

    /// Block explorer base URL used for transaction links.
    pub explorer_url: String,

    /// RPC request timeout in seconds.
    pub rpc_timeout_secs: u64,

    /// Maximum time to wait for a transaction to be mined, in seconds.
    pub confirmation_timeout_secs: u64,

    /// Number of block confirmations required before reporting success.
    pub confirmation_blocks: u32,

    /// Receipt polling interval in milliseconds.
    pub poll_interval_ms: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            name: "Sepolia".to_string(),
            chain_id: SEPOLIA_CHAIN_ID,
            rpc_url: None,
            explorer_url: "https://sepolia.etherscan.io".to_string(),
            rpc_timeout_secs: 30,
            confirmation_timeout_secs: 300,
            confirmation_blocks: 1,
            poll_interval_ms: 2000,
        }
    }
}

/// Token contract configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TokenConfig {
    /// Address of the deployed token contract.
    pub contract_address: String,

    /// Display symbol.
    pub symbol: String,

    /// Decimals used to parse and format amounts.
    pub decimals: u8,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            contract_address: String::new(),
            symbol: "EDT".to_string(),
            decimals: 18,
        }
    }
}

/// Transfer history configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Number of transfers shown when no limit is given.
    pub default_limit: usize,

    /// Upper bound accepted for `--limit`.
    pub max_limit: usize,

    /// First block scanned for Transfer events.
    pub from_block: u64,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            default_limit: 20,
            max_limit: 100,
            from_block: 0,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
        }
    }
}

impl CliConfig {
    /// Explorer link for a transaction hash.
    pub fn tx_url(&self, tx_hash: impl std::fmt::Display) -> String {
        format!("{}/tx/{}", self.network.explorer_url.trim_end_matches('/'), tx_hash)
    }
}
