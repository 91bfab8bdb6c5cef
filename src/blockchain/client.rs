//! Blockchain RPC client with timeout and error handling.
//!
//! # Responsibilities
//! - Connect to JSON-RPC endpoint (primary + failovers)
//! - Query chain state (chain ID, code, unlocked accounts)
//! - Handle timeouts and network errors gracefully

use alloy::primitives::{Address, Bytes};
use alloy::providers::{Provider, ProviderBuilder};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

use crate::blockchain::provider::ChainProvider;
use crate::blockchain::types::{BlockchainError, BlockchainResult, ChainId};
use crate::config::WalletConfig;

/// Blockchain RPC client wrapper with failover support.
#[derive(Clone)]
pub struct BlockchainClient {
    /// List of providers (primary + failovers).
    providers: Vec<Arc<dyn Provider + Send + Sync>>,
    /// Configuration.
    config: WalletConfig,
    /// Request timeout duration.
    timeout_duration: Duration,
}

impl BlockchainClient {
    /// Create a new blockchain client.
    ///
    /// Does no I/O. Fails only when the primary endpoint is missing or
    /// malformed; an unreachable node surfaces on the first query instead.
    pub fn connect(config: &WalletConfig) -> BlockchainResult<Self> {
        let timeout_duration = Duration::from_secs(config.rpc_timeout_secs);
        let mut providers = Vec::new();

        if config.rpc_url.trim().is_empty() {
            return Err(BlockchainError::NotAvailable("no RPC endpoint configured".to_string()));
        }

        // 1. Add primary provider
        let primary_url: url::Url = config.rpc_url.parse().map_err(|e| {
            BlockchainError::Rpc(format!("Invalid RPC URL '{}': {}", config.rpc_url, e))
        })?;
        providers.push(Arc::new(ProviderBuilder::new().connect_http(primary_url)) as Arc<dyn Provider + Send + Sync>);

        // 2. Add failover providers
        for url_str in &config.failover_urls {
            if let Ok(url) = url_str.parse() {
                providers.push(Arc::new(ProviderBuilder::new().connect_http(url)) as Arc<dyn Provider + Send + Sync>);
            } else {
                tracing::warn!(url = %url_str, "Ignoring invalid failover RPC URL");
            }
        }

        tracing::debug!(
            rpc_url = %config.rpc_url,
            failovers = providers.len() - 1,
            "Blockchain client initialized"
        );

        Ok(Self {
            providers,
            config: config.clone(),
            timeout_duration,
        })
    }

    /// Compare a reported chain ID with `expected_chain_id`, if configured.
    pub fn check_expected_chain(&self, actual: ChainId) -> BlockchainResult<()> {
        match self.config.expected_chain_id {
            Some(expected) if expected != actual.0 => Err(BlockchainError::ChainMismatch {
                expected,
                actual: actual.0,
            }),
            _ => Ok(()),
        }
    }

    /// Get the chain ID from the RPC.
    pub async fn get_chain_id(&self) -> BlockchainResult<ChainId> {
        let mut timeouts = 0;
        for (i, provider) in self.providers.iter().enumerate() {
            let fut = provider.get_chain_id();
            match timeout(self.timeout_duration, fut).await {
                Ok(Ok(result)) => return Ok(ChainId(result)),
                Ok(Err(e)) => {
                    tracing::warn!(provider_idx = i, error = %e, "RPC error, trying next provider");
                }
                Err(_) => {
                    timeouts += 1;
                    tracing::warn!(provider_idx = i, "RPC timeout, trying next provider");
                }
            }
        }
        Err(self.exhausted(timeouts, "All RPC providers failed"))
    }

    /// Get the deployed bytecode at an address.
    pub async fn get_code_at(&self, address: Address) -> BlockchainResult<Bytes> {
        let mut timeouts = 0;
        for (i, provider) in self.providers.iter().enumerate() {
            let fut = provider.get_code_at(address);
            match timeout(self.timeout_duration, fut).await {
                Ok(Ok(result)) => return Ok(result),
                Ok(Err(e)) => tracing::warn!(provider_idx = i, error = %e, "RPC error"),
                Err(_) => {
                    timeouts += 1;
                    tracing::warn!(provider_idx = i, "RPC timeout");
                }
            }
        }
        Err(self.exhausted(timeouts, "All providers failed to get code"))
    }

    /// Get the accounts the node has unlocked for this client.
    pub async fn get_accounts(&self) -> BlockchainResult<Vec<Address>> {
        let mut timeouts = 0;
        for (i, provider) in self.providers.iter().enumerate() {
            let fut = provider.get_accounts();
            match timeout(self.timeout_duration, fut).await {
                Ok(Ok(result)) => return Ok(result),
                Ok(Err(e)) => tracing::warn!(provider_idx = i, error = %e, "RPC error"),
                Err(_) => {
                    timeouts += 1;
                    tracing::warn!(provider_idx = i, "RPC timeout");
                }
            }
        }
        Err(self.exhausted(timeouts, "All providers failed to get accounts"))
    }

    /// `Timeout` when every provider timed out, `Rpc` otherwise.
    fn exhausted(&self, timeouts: usize, message: &str) -> BlockchainError {
        if timeouts == self.providers.len() {
            BlockchainError::Timeout(self.config.rpc_timeout_secs)
        } else {
            BlockchainError::Rpc(message.to_string())
        }
    }
}

#[async_trait]
impl ChainProvider for BlockchainClient {
    fn endpoint(&self) -> String {
        self.config.rpc_url.clone()
    }

    async fn chain_id(&self) -> BlockchainResult<u64> {
        let chain_id = self.get_chain_id().await?;
        if let Err(e) = self.check_expected_chain(chain_id) {
            // Wallets may switch networks later; report the chain anyway.
            tracing::warn!(rpc_url = %self.config.rpc_url, error = %e, "Unexpected chain");
        } else if self.config.expected_chain_id.is_some() {
            tracing::info!(rpc_url = %self.config.rpc_url, chain_id = %chain_id, "Chain verified");
        }
        Ok(chain_id.0)
    }

    async fn code_at(&self, address: Address) -> BlockchainResult<Bytes> {
        self.get_code_at(address).await
    }
}

impl std::fmt::Debug for BlockchainClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockchainClient")
            .field("rpc_url", &self.config.rpc_url)
            .field("providers", &self.providers.len())
            .field("timeout_secs", &self.config.rpc_timeout_secs)
            .finish()
    }
}
