//! Shared mocks for bootstrap integration tests.

#![allow(dead_code)]

pub mod rpc_node;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use alloy::primitives::{address, Address, Bytes};
use async_trait::async_trait;

use dapp_bootstrap::blockchain::{
    BlockchainError, BlockchainResult, ChainProvider, ContractRegistry, WalletError,
    WalletExtension, WalletResult,
};
use dapp_bootstrap::config::{BootstrapConfig, NetworkConfig};

/// First Hardhat account.
pub const HARDHAT_ACCOUNT: Address = address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
pub const TOKEN_ADDRESS: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";
pub const AMM_ADDRESS: &str = "0xe7f1725E7734CE288F8367e1Bb143E90bb3F0512";

/// Ordered record of every wallet and provider call.
#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    pub fn push(&self, entry: impl Into<String>) {
        self.0.lock().unwrap().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.entries().iter().filter(|e| e.starts_with(prefix)).count()
    }

    pub fn position(&self, prefix: &str) -> Option<usize> {
        self.entries().iter().position(|e| e.starts_with(prefix))
    }
}

#[derive(Debug)]
pub struct MockProvider {
    pub chain_id: u64,
    pub chain_delay: Duration,
    pub fail_chain_id: bool,
    pub code: Bytes,
    pub log: CallLog,
}

#[async_trait]
impl ChainProvider for MockProvider {
    fn endpoint(&self) -> String {
        "mock://wallet".to_string()
    }

    async fn chain_id(&self) -> BlockchainResult<u64> {
        self.log.push("chain_id:start");
        tokio::time::sleep(self.chain_delay).await;
        self.log.push("chain_id:end");
        if self.fail_chain_id {
            return Err(BlockchainError::Rpc("node unreachable".to_string()));
        }
        Ok(self.chain_id)
    }

    async fn code_at(&self, address: Address) -> BlockchainResult<Bytes> {
        self.log.push(format!("code_at:{}", address));
        Ok(self.code.clone())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connection {
    Accept,
    NoWallet,
    Reject,
}

/// Scriptable wallet extension.
#[derive(Debug)]
pub struct MockWallet {
    pub connection: Connection,
    pub accounts: Vec<Address>,
    pub hang_accounts: bool,
    pub chain_id: u64,
    pub chain_delay: Duration,
    pub fail_chain_id: bool,
    pub code: Bytes,
    pub log: CallLog,
}

impl MockWallet {
    /// Wallet connected to `chain_id` with one authorized account and code
    /// deployed everywhere.
    pub fn on_chain(chain_id: u64) -> Self {
        Self {
            connection: Connection::Accept,
            accounts: vec![HARDHAT_ACCOUNT],
            hang_accounts: false,
            chain_id,
            chain_delay: Duration::ZERO,
            fail_chain_id: false,
            code: Bytes::from_static(&[0x60, 0x80, 0x60, 0x40]),
            log: CallLog::default(),
        }
    }
}

#[async_trait]
impl WalletExtension for MockWallet {
    async fn request_connection(&self) -> WalletResult<Arc<dyn ChainProvider>> {
        self.log.push("request_connection");
        match self.connection {
            Connection::NoWallet => Err(WalletError::Unavailable("no extension installed".to_string())),
            Connection::Reject => Err(WalletError::Rejected("user denied".to_string())),
            Connection::Accept => Ok(Arc::new(MockProvider {
                chain_id: self.chain_id,
                chain_delay: self.chain_delay,
                fail_chain_id: self.fail_chain_id,
                code: self.code.clone(),
                log: self.log.clone(),
            })),
        }
    }

    async fn request_accounts(&self) -> WalletResult<Vec<Address>> {
        self.log.push("request_accounts");
        if self.hang_accounts {
            std::future::pending::<()>().await;
        }
        Ok(self.accounts.clone())
    }
}

/// Registry with the Hardhat deployments on chain 31337.
pub fn hardhat_registry() -> ContractRegistry {
    ContractRegistry::from_config(&[NetworkConfig {
        chain_id: 31337,
        name: "hardhat".to_string(),
        token: TOKEN_ADDRESS.to_string(),
        amm: AMM_ADDRESS.to_string(),
        token_abi: None,
        amm_abi: None,
    }])
    .unwrap()
}

pub fn bootstrap_config(step_timeout_secs: u64) -> BootstrapConfig {
    BootstrapConfig {
        step_timeout_secs,
        verify_deployment: true,
    }
}
