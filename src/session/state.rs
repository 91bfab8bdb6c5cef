//! Session data and the bootstrap state machine.

use alloy::primitives::Address;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

use crate::blockchain::{ChainId, ChainProvider, ContractBinding};

/// One step of the bootstrap sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BootstrapStep {
    Provider,
    Network,
    Account,
    Token,
    Amm,
}

impl BootstrapStep {
    /// All steps in execution order.
    pub const ORDER: [BootstrapStep; 5] = [
        BootstrapStep::Provider,
        BootstrapStep::Network,
        BootstrapStep::Account,
        BootstrapStep::Token,
        BootstrapStep::Amm,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BootstrapStep::Provider => "provider",
            BootstrapStep::Network => "network",
            BootstrapStep::Account => "account",
            BootstrapStep::Token => "token",
            BootstrapStep::Amm => "amm",
        }
    }
}

impl std::fmt::Display for BootstrapStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the bootstrap currently is.
///
/// ```text
/// Idle → ProviderLoading → NetworkLoading → AccountLoading
///      → TokenLoading → AmmLoading → Ready
/// any *Loading → Failed
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum BootstrapPhase {
    #[default]
    Idle,
    ProviderLoading,
    NetworkLoading,
    AccountLoading,
    TokenLoading,
    AmmLoading,
    Ready,
    Failed { step: BootstrapStep, error: String },
}

impl BootstrapPhase {
    /// The loading phase for `step`.
    pub fn loading(step: BootstrapStep) -> Self {
        match step {
            BootstrapStep::Provider => BootstrapPhase::ProviderLoading,
            BootstrapStep::Network => BootstrapPhase::NetworkLoading,
            BootstrapStep::Account => BootstrapPhase::AccountLoading,
            BootstrapStep::Token => BootstrapPhase::TokenLoading,
            BootstrapStep::Amm => BootstrapPhase::AmmLoading,
        }
    }

    /// Step in progress, if this is a loading phase.
    pub fn step(&self) -> Option<BootstrapStep> {
        match self {
            BootstrapPhase::ProviderLoading => Some(BootstrapStep::Provider),
            BootstrapPhase::NetworkLoading => Some(BootstrapStep::Network),
            BootstrapPhase::AccountLoading => Some(BootstrapStep::Account),
            BootstrapPhase::TokenLoading => Some(BootstrapStep::Token),
            BootstrapPhase::AmmLoading => Some(BootstrapStep::Amm),
            _ => None,
        }
    }

    /// `Ready` and `Failed` have no way out.
    pub fn is_terminal(&self) -> bool {
        matches!(self, BootstrapPhase::Ready | BootstrapPhase::Failed { .. })
    }

    /// Whether moving from `self` to `next` follows the state machine.
    pub fn can_transition(&self, next: &BootstrapPhase) -> bool {
        use BootstrapPhase::*;

        match (self, next) {
            (Idle, ProviderLoading)
            | (ProviderLoading, NetworkLoading)
            | (NetworkLoading, AccountLoading)
            | (AccountLoading, TokenLoading)
            | (TokenLoading, AmmLoading)
            | (AmmLoading, Ready) => true,
            (current, Failed { .. }) => current.step().is_some(),
            _ => false,
        }
    }
}

impl std::fmt::Display for BootstrapPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BootstrapPhase::Idle => f.write_str("idle"),
            BootstrapPhase::Ready => f.write_str("ready"),
            BootstrapPhase::Failed { step, .. } => write!(f, "failed at {}", step),
            loading => match loading.step() {
                Some(step) => write!(f, "{} loading", step),
                None => f.write_str("unknown"),
            },
        }
    }
}

/// Rejected state machine move.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid bootstrap transition from {from} to {to}")]
pub struct TransitionError {
    pub from: BootstrapPhase,
    pub to: BootstrapPhase,
}

/// Store actions, in the order they were applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreAction {
    SetProvider,
    SetNetwork,
    SetAccount,
    SetTokenContract,
    SetAmmContract,
}

/// Everything the bootstrap has published so far.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Session {
    pub phase: BootstrapPhase,
    #[serde(skip)]
    pub provider: Option<Arc<dyn ChainProvider>>,
    pub endpoint: Option<String>,
    pub network: Option<ChainId>,
    pub account: Option<Address>,
    pub token: Option<ContractBinding>,
    pub amm: Option<ContractBinding>,
    pub actions: Vec<StoreAction>,
}

impl Session {
    pub fn is_ready(&self) -> bool {
        self.phase == BootstrapPhase::Ready
    }
}
