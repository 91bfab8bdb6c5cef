//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the client.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the dApp client.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Wallet connection settings.
    pub wallet: WalletConfig,

    /// Bootstrap sequencing settings.
    pub bootstrap: BootstrapConfig,

    /// Page server settings.
    pub server: ServerConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Per-network contract deployments.
    pub networks: Vec<NetworkConfig>,
}

/// Wallet connection configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WalletConfig {
    /// JSON-RPC endpoint URL. Empty means no wallet is available.
    pub rpc_url: String,

    /// Failover JSON-RPC endpoint URLs.
    pub failover_urls: Vec<String>,

    /// RPC request timeout in seconds.
    pub rpc_timeout_secs: u64,

    /// Chain the wallet is expected to be on (e.g., 31337 for local Hardhat).
    /// Mismatches are logged, not fatal.
    pub expected_chain_id: Option<u64>,

    /// Use a local signer (key from `DAPP_WALLET_PRIVATE_KEY`) as the account
    /// instead of asking the node for unlocked accounts.
    pub use_local_signer: bool,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            rpc_url: "http://localhost:8545".to_string(),
            failover_urls: Vec::new(),
            rpc_timeout_secs: 10,
            expected_chain_id: None,
            use_local_signer: false,
        }
    }
}

/// Bootstrap sequencing configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BootstrapConfig {
    /// Upper bound for a single bootstrap step in seconds (0 = wait forever).
    pub step_timeout_secs: u64,

    /// Check that contract addresses hold deployed code before binding.
    pub verify_deployment: bool,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            step_timeout_secs: 60,
            verify_deployment: true,
        }
    }
}

/// Page server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:3000").
    pub bind_address: String,

    /// Heading shown on the page.
    pub title: String,

    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:3000".to_string(),
            title: "dApp Hardhat Template".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

/// Contract deployments for one chain.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NetworkConfig {
    /// Chain ID the addresses belong to.
    pub chain_id: u64,

    /// Human readable name used in logs.
    #[serde(default)]
    pub name: String,

    /// Token contract address.
    pub token: String,

    /// AMM pool contract address.
    pub amm: String,

    /// Optional path to a JSON ABI for the token. Bundled ABI when unset.
    #[serde(default)]
    pub token_abi: Option<String>,

    /// Optional path to a JSON ABI for the pool. Bundled ABI when unset.
    #[serde(default)]
    pub amm_abi: Option<String>,
}
