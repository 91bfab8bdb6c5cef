//! Connection handle handed out by a wallet.

use alloy::primitives::{Address, Bytes};
use async_trait::async_trait;

use crate::blockchain::types::BlockchainResult;

/// A wallet's connection to a blockchain node.
///
/// Everything after the connection step talks to the chain through this
/// trait, so the bootstrap never depends on a concrete transport.
#[async_trait]
pub trait ChainProvider: std::fmt::Debug + Send + Sync {
    /// Endpoint description for logs and the session view.
    fn endpoint(&self) -> String;

    /// Chain identifier of the connected network.
    async fn chain_id(&self) -> BlockchainResult<u64>;

    /// Deployed bytecode at `address` (empty when nothing is deployed).
    async fn code_at(&self, address: Address) -> BlockchainResult<Bytes>;
}
