//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! WalletConfig (RPC URL, optional signer key from environment)
//!     → wallet.rs (WalletExtension: connection + authorized accounts)
//!     → client.rs (RPC connection with timeouts and failover)
//!     → provider.rs (ChainProvider handle used by later steps)
//!     → contracts.rs (registry lookup by chain ID, contract binding)
//! ```
//!
//! # Security Constraints
//! - Private keys ONLY from environment variables
//! - Never log private keys or sensitive data
//! - All RPC calls have configurable timeouts

pub mod client;
pub mod contracts;
pub mod provider;
pub mod types;
pub mod wallet;

pub use client::BlockchainClient;
pub use contracts::{BindError, ContractBinding, ContractKind, ContractRegistry, ContractSpec, NetworkContracts};
pub use provider::ChainProvider;
pub use types::{BlockchainError, BlockchainResult, ChainId};
pub use wallet::{LocalSigner, RpcWallet, WalletError, WalletExtension, WalletResult};
