//! The five bootstrap steps.
//!
//! Each step does one wallet or chain request and publishes the result to
//! the session store. Sequencing, timeouts and phase changes live in the
//! runner.

use alloy::primitives::Address;
use std::sync::Arc;

use crate::blockchain::{
    ChainId, ChainProvider, ContractBinding, ContractKind, ContractRegistry, WalletError,
    WalletExtension,
};
use crate::bootstrap::error::{BootstrapError, BootstrapResult};
use crate::session::SessionStore;

/// Request a connection from the wallet and publish it.
pub async fn load_provider(
    wallet: &dyn WalletExtension,
    store: &SessionStore,
) -> BootstrapResult<Arc<dyn ChainProvider>> {
    let provider = wallet.request_connection().await.map_err(|e| match e {
        WalletError::Unavailable(reason) => BootstrapError::NoWalletAvailable(reason),
        WalletError::Rejected(reason) => BootstrapError::ConnectionRejected(reason),
    })?;

    tracing::info!(endpoint = %provider.endpoint(), "Provider connected");
    store.set_provider(provider.clone());
    Ok(provider)
}

/// Query the connected chain's identifier and publish it.
pub async fn load_network(
    provider: &dyn ChainProvider,
    store: &SessionStore,
) -> BootstrapResult<ChainId> {
    let chain_id = provider
        .chain_id()
        .await
        .map(ChainId)
        .map_err(|e| BootstrapError::ProviderUnavailable(e.to_string()))?;

    tracing::info!(chain_id = %chain_id, "Network resolved");
    store.set_network(chain_id);
    Ok(chain_id)
}

/// Ask the wallet for the authorized account and publish it.
///
/// Goes to the wallet directly; the provider and network are not consulted.
pub async fn load_account(
    wallet: &dyn WalletExtension,
    store: &SessionStore,
) -> BootstrapResult<Address> {
    let accounts = wallet.request_accounts().await.map_err(|e| {
        tracing::warn!(error = %e, "Account request refused");
        BootstrapError::NoAccountAuthorized
    })?;

    let account = accounts
        .first()
        .copied()
        .ok_or(BootstrapError::NoAccountAuthorized)?;

    tracing::info!(account = %account, "Account loaded");
    store.set_account(account);
    Ok(account)
}

/// Bind the token contract configured for `chain_id` and publish it.
pub async fn load_tokens(
    provider: &dyn ChainProvider,
    chain_id: ChainId,
    registry: &ContractRegistry,
    verify_deployment: bool,
    store: &SessionStore,
) -> BootstrapResult<ContractBinding> {
    let binding = bind(ContractKind::Token, provider, chain_id, registry, verify_deployment).await?;
    store.set_token_contract(binding.clone());
    Ok(binding)
}

/// Bind the AMM pool contract configured for `chain_id` and publish it.
pub async fn load_amm(
    provider: &dyn ChainProvider,
    chain_id: ChainId,
    registry: &ContractRegistry,
    verify_deployment: bool,
    store: &SessionStore,
) -> BootstrapResult<ContractBinding> {
    let binding = bind(ContractKind::Amm, provider, chain_id, registry, verify_deployment).await?;
    store.set_amm_contract(binding.clone());
    Ok(binding)
}

async fn bind(
    kind: ContractKind,
    provider: &dyn ChainProvider,
    chain_id: ChainId,
    registry: &ContractRegistry,
    verify_deployment: bool,
) -> BootstrapResult<ContractBinding> {
    let spec = registry
        .lookup(chain_id, kind)
        .ok_or(BootstrapError::UnsupportedNetwork(chain_id.0))?;

    let binding = ContractBinding::bind(kind, chain_id, spec, provider, verify_deployment)
        .await
        .map_err(|e| BootstrapError::ContractBindingFailed {
            contract: kind,
            reason: e.to_string(),
        })?;

    tracing::info!(
        contract = %kind,
        address = %binding.address,
        chain_id = %chain_id,
        "Contract bound"
    );
    Ok(binding)
}
