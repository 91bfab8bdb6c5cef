//! Per-network contract registry and contract bindings.

use alloy::json_abi::JsonAbi;
use alloy::primitives::{Address, Selector};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

use crate::blockchain::provider::ChainProvider;
use crate::blockchain::types::{BlockchainError, ChainId};
use crate::config::{ConfigError, NetworkConfig};

const TOKEN_ABI: &str = include_str!("abis/Token.json");
const AMM_ABI: &str = include_str!("abis/AMM.json");

/// Contracts the client binds during bootstrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractKind {
    Token,
    Amm,
}

impl ContractKind {
    /// Functions an interface must expose to be bound as this kind.
    pub fn required_functions(&self) -> &'static [&'static str] {
        match self {
            ContractKind::Token => &["balanceOf", "transfer", "approve"],
            ContractKind::Amm => &["token1", "token2", "swapToken1", "swapToken2"],
        }
    }

    /// ABI shipped with the crate.
    pub fn bundled_abi(&self) -> Result<JsonAbi, serde_json::Error> {
        match self {
            ContractKind::Token => serde_json::from_str(TOKEN_ABI),
            ContractKind::Amm => serde_json::from_str(AMM_ABI),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContractKind::Token => "token",
            ContractKind::Amm => "amm",
        }
    }
}

impl std::fmt::Display for ContractKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Address and interface of one deployment.
#[derive(Debug, Clone)]
pub struct ContractSpec {
    pub address: Address,
    pub interface: Arc<JsonAbi>,
}

/// Deployments configured for one chain.
#[derive(Debug, Clone)]
pub struct NetworkContracts {
    pub name: String,
    pub token: ContractSpec,
    pub amm: ContractSpec,
}

impl NetworkContracts {
    pub fn get(&self, kind: ContractKind) -> &ContractSpec {
        match kind {
            ContractKind::Token => &self.token,
            ContractKind::Amm => &self.amm,
        }
    }
}

/// Map of chain ID to contract deployments.
#[derive(Debug, Clone, Default)]
pub struct ContractRegistry {
    networks: HashMap<ChainId, NetworkContracts>,
}

impl ContractRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the registry from validated network configuration, loading
    /// ABI files where configured.
    pub fn from_config(networks: &[NetworkConfig]) -> Result<Self, ConfigError> {
        let mut registry = Self::new();
        for network in networks {
            let token = load_spec(network, ContractKind::Token)?;
            let amm = load_spec(network, ContractKind::Amm)?;
            let name = if network.name.is_empty() {
                format!("chain-{}", network.chain_id)
            } else {
                network.name.clone()
            };
            registry.insert(ChainId(network.chain_id), NetworkContracts { name, token, amm });
        }
        tracing::info!(networks = registry.len(), "Contract registry loaded");
        Ok(registry)
    }

    pub fn insert(&mut self, chain_id: ChainId, contracts: NetworkContracts) {
        self.networks.insert(chain_id, contracts);
    }

    /// Deployments for a chain, if it is supported.
    pub fn network(&self, chain_id: ChainId) -> Option<&NetworkContracts> {
        self.networks.get(&chain_id)
    }

    pub fn lookup(&self, chain_id: ChainId, kind: ContractKind) -> Option<&ContractSpec> {
        self.network(chain_id).map(|n| n.get(kind))
    }

    pub fn len(&self) -> usize {
        self.networks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.networks.is_empty()
    }
}

fn load_spec(network: &NetworkConfig, kind: ContractKind) -> Result<ContractSpec, ConfigError> {
    let (raw_address, abi_path) = match kind {
        ContractKind::Token => (&network.token, &network.token_abi),
        ContractKind::Amm => (&network.amm, &network.amm_abi),
    };

    let address: Address = raw_address.parse().map_err(|e| ConfigError::Abi {
        path: format!("networks[{}].{}", network.chain_id, kind),
        reason: format!("invalid address: {}", e),
    })?;

    let interface = match abi_path {
        Some(path) => {
            let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
            serde_json::from_str(&content).map_err(|e| ConfigError::Abi {
                path: path.clone(),
                reason: e.to_string(),
            })?
        }
        None => kind.bundled_abi().map_err(|e| ConfigError::Abi {
            path: format!("bundled {}", kind),
            reason: e.to_string(),
        })?,
    };

    Ok(ContractSpec {
        address,
        interface: Arc::new(interface),
    })
}

/// Reasons a binding can fail.
#[derive(Debug, Error)]
pub enum BindError {
    #[error("interface has no `{0}` function")]
    MissingFunction(&'static str),

    #[error("no code deployed at {0}")]
    NotDeployed(Address),

    #[error(transparent)]
    Rpc(#[from] BlockchainError),
}

/// Handle to a deployed contract on a specific chain.
#[derive(Debug, Clone, Serialize)]
pub struct ContractBinding {
    pub kind: ContractKind,
    pub chain_id: ChainId,
    pub address: Address,
    #[serde(skip)]
    interface: Arc<JsonAbi>,
}

impl ContractBinding {
    /// Bind `spec` as a `kind` contract.
    ///
    /// The interface is checked for the functions the kind requires. With
    /// `verify_deployment` the provider must report code at the address.
    pub async fn bind(
        kind: ContractKind,
        chain_id: ChainId,
        spec: &ContractSpec,
        provider: &dyn ChainProvider,
        verify_deployment: bool,
    ) -> Result<Self, BindError> {
        for &name in kind.required_functions() {
            if spec.interface.function(name).is_none() {
                return Err(BindError::MissingFunction(name));
            }
        }

        if verify_deployment {
            let code = provider.code_at(spec.address).await?;
            if code.is_empty() {
                return Err(BindError::NotDeployed(spec.address));
            }
        }

        Ok(Self {
            kind,
            chain_id,
            address: spec.address,
            interface: spec.interface.clone(),
        })
    }

    /// Selector of the first overload named `name`.
    pub fn selector(&self, name: &str) -> Option<Selector> {
        self.interface
            .function(name)
            .and_then(|overloads| overloads.first())
            .map(|f| f.selector())
    }
}
