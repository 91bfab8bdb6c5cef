//! Session store shared between the bootstrap and the page server.
//!
//! One writer (the bootstrap) publishes whole snapshots; readers load the
//! latest snapshot without locking.

use alloy::primitives::Address;
use arc_swap::ArcSwap;
use std::sync::Arc;

use crate::blockchain::{ChainId, ChainProvider, ContractBinding};
use crate::session::state::{BootstrapPhase, Session, StoreAction, TransitionError};

/// Explicit session context handed to the bootstrap and the HTTP layer.
#[derive(Clone)]
pub struct SessionStore {
    current: Arc<ArcSwap<Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            current: Arc::new(ArcSwap::from_pointee(Session::default())),
        }
    }

    /// Latest published session.
    pub fn snapshot(&self) -> Arc<Session> {
        self.current.load_full()
    }

    pub fn phase(&self) -> BootstrapPhase {
        self.current.load().phase.clone()
    }

    /// Move the state machine to `next`.
    pub fn transition(&self, next: BootstrapPhase) -> Result<(), TransitionError> {
        let current = self.phase();
        if !current.can_transition(&next) {
            return Err(TransitionError { from: current, to: next });
        }
        tracing::debug!(from = %current, to = %next, "Bootstrap phase changed");
        self.update(|session| session.phase = next);
        Ok(())
    }

    /// Mark the step in progress as failed. No-op outside a loading phase.
    pub fn fail(&self, error: &dyn std::fmt::Display) {
        let Some(step) = self.phase().step() else {
            return;
        };
        let error = error.to_string();
        self.update(|session| session.phase = BootstrapPhase::Failed { step, error });
    }

    pub fn set_provider(&self, provider: Arc<dyn ChainProvider>) {
        let endpoint = provider.endpoint();
        self.update(|session| {
            session.provider = Some(provider);
            session.endpoint = Some(endpoint);
            session.actions.push(StoreAction::SetProvider);
        });
    }

    pub fn set_network(&self, chain_id: ChainId) {
        self.update(|session| {
            session.network = Some(chain_id);
            session.actions.push(StoreAction::SetNetwork);
        });
    }

    pub fn set_account(&self, account: Address) {
        self.update(|session| {
            session.account = Some(account);
            session.actions.push(StoreAction::SetAccount);
        });
    }

    pub fn set_token_contract(&self, binding: ContractBinding) {
        self.update(|session| {
            session.token = Some(binding);
            session.actions.push(StoreAction::SetTokenContract);
        });
    }

    pub fn set_amm_contract(&self, binding: ContractBinding) {
        self.update(|session| {
            session.amm = Some(binding);
            session.actions.push(StoreAction::SetAmmContract);
        });
    }

    fn update(&self, f: impl FnOnce(&mut Session)) {
        let mut next = Session::clone(&self.current.load());
        f(&mut next);
        self.current.store(Arc::new(next));
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("phase", &self.phase())
            .finish()
    }
}
