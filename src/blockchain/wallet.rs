//! Wallet abstraction and the JSON-RPC backed implementation.
//!
//! # Security
//! - Private keys are loaded ONLY from environment variables
//! - Keys are never logged or serialized

use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::blockchain::client::BlockchainClient;
use crate::blockchain::provider::ChainProvider;
use crate::blockchain::types::{BlockchainError, BlockchainResult};
use crate::config::WalletConfig;

/// Environment variable name for the private key.
pub const PRIVATE_KEY_ENV_VAR: &str = "DAPP_WALLET_PRIVATE_KEY";

/// Ways a wallet can refuse a request.
#[derive(Debug, Error)]
pub enum WalletError {
    /// There is no wallet to talk to.
    #[error("wallet unavailable: {0}")]
    Unavailable(String),

    /// The wallet refused the request.
    #[error("request rejected: {0}")]
    Rejected(String),
}

/// Result type for wallet requests.
pub type WalletResult<T> = Result<T, WalletError>;

/// The wallet the user has installed.
///
/// `request_accounts` does not go through the connection handed out by
/// `request_connection`; callers may invoke them in any order.
#[async_trait]
pub trait WalletExtension: Send + Sync {
    /// Ask the wallet for a connection to its node.
    async fn request_connection(&self) -> WalletResult<Arc<dyn ChainProvider>>;

    /// Ask the wallet which addresses the user has authorized.
    async fn request_accounts(&self) -> WalletResult<Vec<Address>>;
}

/// Signer backed by a private key held in memory.
#[derive(Debug, Clone)]
pub struct LocalSigner {
    signer: PrivateKeySigner,
}

impl LocalSigner {
    /// Create a signer from a hex-encoded private key string.
    ///
    /// # Arguments
    /// * `private_key_hex` - Hex string (with or without 0x prefix)
    pub fn from_private_key(private_key_hex: &str) -> BlockchainResult<Self> {
        let key_hex = private_key_hex.strip_prefix("0x").unwrap_or(private_key_hex);

        let signer: PrivateKeySigner = key_hex
            .parse()
            .map_err(|e| BlockchainError::Wallet(format!("Invalid private key format: {}", e)))?;

        tracing::info!(address = %signer.address(), "Local signer loaded");

        Ok(Self { signer })
    }

    /// Load the signer from `DAPP_WALLET_PRIVATE_KEY`.
    pub fn from_env() -> BlockchainResult<Self> {
        let private_key = std::env::var(PRIVATE_KEY_ENV_VAR).map_err(|_| {
            BlockchainError::Wallet(format!(
                "Environment variable {} not set",
                PRIVATE_KEY_ENV_VAR
            ))
        })?;

        Self::from_private_key(&private_key)
    }

    /// Get the signer's address.
    pub fn address(&self) -> Address {
        self.signer.address()
    }
}

/// Wallet that reaches a node over JSON-RPC.
///
/// Accounts come from the local signer when one is configured, otherwise
/// from the node's unlocked accounts (`eth_accounts`).
#[derive(Debug, Clone)]
pub struct RpcWallet {
    config: WalletConfig,
    signer: Option<LocalSigner>,
}

impl RpcWallet {
    /// Create a wallet without a local signer.
    pub fn new(config: WalletConfig) -> Self {
        Self { config, signer: None }
    }

    /// Create a wallet from configuration, loading the signer from the
    /// environment when `use_local_signer` is set.
    pub fn from_config(config: &WalletConfig) -> BlockchainResult<Self> {
        let signer = if config.use_local_signer {
            Some(LocalSigner::from_env()?)
        } else {
            None
        };
        Ok(Self {
            config: config.clone(),
            signer,
        })
    }

    /// Attach a local signer.
    pub fn with_signer(mut self, signer: LocalSigner) -> Self {
        self.signer = Some(signer);
        self
    }

    fn client(&self) -> WalletResult<BlockchainClient> {
        BlockchainClient::connect(&self.config).map_err(|e| match e {
            BlockchainError::NotAvailable(reason) => WalletError::Unavailable(reason),
            other => WalletError::Rejected(other.to_string()),
        })
    }
}

#[async_trait]
impl WalletExtension for RpcWallet {
    async fn request_connection(&self) -> WalletResult<Arc<dyn ChainProvider>> {
        let client = self.client()?;
        Ok(Arc::new(client))
    }

    async fn request_accounts(&self) -> WalletResult<Vec<Address>> {
        if let Some(signer) = &self.signer {
            return Ok(vec![signer.address()]);
        }

        let client = self.client()?;
        client
            .get_accounts()
            .await
            .map_err(|e| WalletError::Rejected(e.to_string()))
    }
}
