//! Bootstrap sequencing.
//!
//! Runs the five steps strictly one after another. Each step moves the
//! session into its loading phase, then races the step against the
//! configured timeout and the shutdown signal.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::Instrument;

use crate::blockchain::{ContractRegistry, WalletExtension};
use crate::bootstrap::error::{BootstrapError, BootstrapResult};
use crate::bootstrap::steps;
use crate::config::BootstrapConfig;
use crate::lifecycle::ShutdownSignal;
use crate::observability::metrics;
use crate::session::{BootstrapPhase, BootstrapStep, Session, SessionStore};

/// Loads provider, network, account and contracts into a session.
pub struct Bootstrap {
    wallet: Arc<dyn WalletExtension>,
    registry: ContractRegistry,
    config: BootstrapConfig,
    started: AtomicBool,
}

impl Bootstrap {
    pub fn new(
        wallet: Arc<dyn WalletExtension>,
        registry: ContractRegistry,
        config: BootstrapConfig,
    ) -> Self {
        Self {
            wallet,
            registry,
            config,
            started: AtomicBool::new(false),
        }
    }

    /// Whether `run` has been called.
    pub fn has_started(&self) -> bool {
        self.started.load(Ordering::SeqCst)
    }

    /// Run the bootstrap sequence once.
    ///
    /// On failure the session is left in `Failed` and the error is returned;
    /// later steps do not run. Calling `run` again returns `AlreadyStarted`
    /// without touching the wallet or the store.
    pub async fn run(
        &self,
        store: &SessionStore,
        mut shutdown: ShutdownSignal,
    ) -> BootstrapResult<Arc<Session>> {
        if self.started.swap(true, Ordering::SeqCst) {
            tracing::warn!("Bootstrap already started, ignoring second run");
            return Err(BootstrapError::AlreadyStarted);
        }

        let span = tracing::info_span!("bootstrap");
        self.run_inner(store, &mut shutdown).instrument(span).await
    }

    async fn run_inner(
        &self,
        store: &SessionStore,
        shutdown: &mut ShutdownSignal,
    ) -> BootstrapResult<Arc<Session>> {
        tracing::info!("Loading blockchain data");

        match self.run_steps(store, shutdown).await {
            Ok(()) => {
                store.transition(BootstrapPhase::Ready)?;
                metrics::record_ready(true);
                let session = store.snapshot();
                tracing::info!(
                    chain_id = ?session.network,
                    account = ?session.account,
                    "Bootstrap complete"
                );
                Ok(session)
            }
            Err(e) => {
                store.fail(&e);
                metrics::record_ready(false);
                tracing::error!(error = %e, phase = %store.phase(), "Bootstrap failed");
                Err(e)
            }
        }
    }

    async fn run_steps(
        &self,
        store: &SessionStore,
        shutdown: &mut ShutdownSignal,
    ) -> BootstrapResult<()> {
        let wallet = self.wallet.as_ref();
        let verify = self.config.verify_deployment;

        let provider = self
            .step(BootstrapStep::Provider, store, shutdown, steps::load_provider(wallet, store))
            .await?;

        let chain_id = self
            .step(
                BootstrapStep::Network,
                store,
                shutdown,
                steps::load_network(provider.as_ref(), store),
            )
            .await?;

        self.step(BootstrapStep::Account, store, shutdown, steps::load_account(wallet, store))
            .await?;

        self.step(
            BootstrapStep::Token,
            store,
            shutdown,
            steps::load_tokens(provider.as_ref(), chain_id, &self.registry, verify, store),
        )
        .await?;

        self.step(
            BootstrapStep::Amm,
            store,
            shutdown,
            steps::load_amm(provider.as_ref(), chain_id, &self.registry, verify, store),
        )
        .await?;

        Ok(())
    }

    async fn step<T, F>(
        &self,
        step: BootstrapStep,
        store: &SessionStore,
        shutdown: &mut ShutdownSignal,
        fut: F,
    ) -> BootstrapResult<T>
    where
        F: Future<Output = BootstrapResult<T>>,
    {
        store.transition(BootstrapPhase::loading(step))?;
        let started = Instant::now();

        let outcome = tokio::select! {
            biased;
            _ = shutdown.recv() => Err(BootstrapError::Cancelled(step)),
            result = self.bounded(step, fut) => result,
        };

        metrics::record_step(step, outcome.is_ok(), started.elapsed());
        outcome
    }

    async fn bounded<T, F>(&self, step: BootstrapStep, fut: F) -> BootstrapResult<T>
    where
        F: Future<Output = BootstrapResult<T>>,
    {
        let secs = self.config.step_timeout_secs;
        if secs == 0 {
            return fut.await;
        }

        tokio::time::timeout(Duration::from_secs(secs), fut)
            .await
            .unwrap_or(Err(BootstrapError::Timeout { step, secs }))
    }
}

impl std::fmt::Debug for Bootstrap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bootstrap")
            .field("networks", &self.registry.len())
            .field("step_timeout_secs", &self.config.step_timeout_secs)
            .field("started", &self.has_started())
            .finish()
    }
}
