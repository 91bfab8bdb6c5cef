//! Bootstrap error taxonomy.

use thiserror::Error;

use crate::blockchain::ContractKind;
use crate::session::{BootstrapStep, TransitionError};

/// Errors that stop the bootstrap sequence.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// No wallet to connect to.
    #[error("no wallet available: {0}")]
    NoWalletAvailable(String),

    /// The wallet refused the connection request.
    #[error("wallet rejected the connection: {0}")]
    ConnectionRejected(String),

    /// The connection could not answer a chain query.
    #[error("provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// The user has not granted access to any account.
    #[error("no account authorized")]
    NoAccountAuthorized,

    /// No contract deployments configured for the connected chain.
    #[error("unsupported network: no contracts configured for chain {0}")]
    UnsupportedNetwork(u64),

    #[error("failed to bind {contract} contract: {reason}")]
    ContractBindingFailed { contract: ContractKind, reason: String },

    #[error("{step} step timed out after {secs}s")]
    Timeout { step: BootstrapStep, secs: u64 },

    #[error("bootstrap cancelled during {0} step")]
    Cancelled(BootstrapStep),

    /// `run` was called more than once.
    #[error("bootstrap already started")]
    AlreadyStarted,

    #[error(transparent)]
    InvalidTransition(#[from] TransitionError),
}

/// Result type for bootstrap operations.
pub type BootstrapResult<T> = Result<T, BootstrapError>;
