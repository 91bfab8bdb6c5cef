//! Bootstrap sequencing tests against a scripted wallet.

use std::sync::Arc;
use std::time::Duration;

use alloy::primitives::{Address, Bytes};
use dapp_bootstrap::blockchain::{ChainId, ContractKind};
use dapp_bootstrap::bootstrap::{self, Bootstrap, BootstrapError};
use dapp_bootstrap::lifecycle::Shutdown;
use dapp_bootstrap::session::{BootstrapPhase, BootstrapStep, SessionStore, StoreAction};

mod common;

use common::{Connection, MockWallet, AMM_ADDRESS, HARDHAT_ACCOUNT, TOKEN_ADDRESS};

fn bootstrap_for(wallet: MockWallet, step_timeout_secs: u64) -> Bootstrap {
    Bootstrap::new(
        Arc::new(wallet),
        common::hardhat_registry(),
        common::bootstrap_config(step_timeout_secs),
    )
}

fn failed_step(store: &SessionStore) -> Option<BootstrapStep> {
    match store.phase() {
        BootstrapPhase::Failed { step, .. } => Some(step),
        _ => None,
    }
}

#[tokio::test]
async fn test_successful_run_publishes_in_order() {
    let wallet = MockWallet::on_chain(31337);
    let log = wallet.log.clone();
    let bootstrap = bootstrap_for(wallet, 5);
    let store = SessionStore::new();
    let shutdown = Shutdown::new();

    let session = bootstrap.run(&store, shutdown.subscribe()).await.unwrap();

    assert_eq!(session.phase, BootstrapPhase::Ready);
    assert_eq!(
        session.actions,
        vec![
            StoreAction::SetProvider,
            StoreAction::SetNetwork,
            StoreAction::SetAccount,
            StoreAction::SetTokenContract,
            StoreAction::SetAmmContract,
        ]
    );
    assert_eq!(session.endpoint.as_deref(), Some("mock://wallet"));
    assert_eq!(session.network, Some(ChainId(31337)));
    assert_eq!(session.account, Some(HARDHAT_ACCOUNT));

    let token = session.token.as_ref().unwrap();
    assert_eq!(token.kind, ContractKind::Token);
    assert_eq!(token.address, TOKEN_ADDRESS.parse::<Address>().unwrap());
    assert_eq!(token.chain_id, ChainId(31337));
    assert!(token.selector("balanceOf").is_some());

    let amm = session.amm.as_ref().unwrap();
    assert_eq!(amm.kind, ContractKind::Amm);
    assert_eq!(amm.address, AMM_ADDRESS.parse::<Address>().unwrap());

    assert_eq!(log.count("request_connection"), 1);
    assert_eq!(log.count("code_at"), 2);
}

#[tokio::test]
async fn test_network_published_once() {
    let wallet = MockWallet::on_chain(31337);
    let log = wallet.log.clone();
    let bootstrap = bootstrap_for(wallet, 5);
    let store = SessionStore::new();
    let shutdown = Shutdown::new();

    bootstrap.run(&store, shutdown.subscribe()).await.unwrap();

    // A second mount must not run the sequence again.
    let second = bootstrap.run(&store, shutdown.subscribe()).await;
    assert!(matches!(second, Err(BootstrapError::AlreadyStarted)));

    let session = store.snapshot();
    let network_updates = session
        .actions
        .iter()
        .filter(|a| **a == StoreAction::SetNetwork)
        .count();
    assert_eq!(network_updates, 1);
    assert_eq!(session.network, Some(ChainId(31337)));
    assert_eq!(session.phase, BootstrapPhase::Ready);
    assert_eq!(log.count("chain_id:start"), 1);
    assert_eq!(log.count("request_connection"), 1);
}

#[tokio::test]
async fn test_rejected_connection_stops_sequence() {
    let mut wallet = MockWallet::on_chain(31337);
    wallet.connection = Connection::Reject;
    let log = wallet.log.clone();
    let bootstrap = bootstrap_for(wallet, 5);
    let store = SessionStore::new();
    let shutdown = Shutdown::new();

    let result = bootstrap.run(&store, shutdown.subscribe()).await;

    assert!(matches!(result, Err(BootstrapError::ConnectionRejected(_))));
    assert_eq!(log.entries(), vec!["request_connection".to_string()]);
    assert_eq!(failed_step(&store), Some(BootstrapStep::Provider));
    assert!(store.snapshot().actions.is_empty());
}

#[tokio::test]
async fn test_missing_wallet() {
    let mut wallet = MockWallet::on_chain(31337);
    wallet.connection = Connection::NoWallet;
    let bootstrap = bootstrap_for(wallet, 5);
    let store = SessionStore::new();
    let shutdown = Shutdown::new();

    let result = bootstrap.run(&store, shutdown.subscribe()).await;

    assert!(matches!(result, Err(BootstrapError::NoWalletAvailable(_))));
    assert_eq!(failed_step(&store), Some(BootstrapStep::Provider));
}

#[tokio::test]
async fn test_contracts_wait_for_network() {
    let mut wallet = MockWallet::on_chain(31337);
    wallet.chain_delay = Duration::from_millis(50);
    let log = wallet.log.clone();
    let bootstrap = bootstrap_for(wallet, 5);
    let store = SessionStore::new();
    let shutdown = Shutdown::new();

    bootstrap.run(&store, shutdown.subscribe()).await.unwrap();

    let network_done = log.position("chain_id:end").unwrap();
    let accounts = log.position("request_accounts").unwrap();
    let first_bind = log.position("code_at").unwrap();
    assert!(network_done < accounts);
    assert!(accounts < first_bind);
}

#[tokio::test]
async fn test_chain_query_failure() {
    let mut wallet = MockWallet::on_chain(31337);
    wallet.fail_chain_id = true;
    let log = wallet.log.clone();
    let bootstrap = bootstrap_for(wallet, 5);
    let store = SessionStore::new();
    let shutdown = Shutdown::new();

    let result = bootstrap.run(&store, shutdown.subscribe()).await;

    assert!(matches!(result, Err(BootstrapError::ProviderUnavailable(_))));
    assert_eq!(failed_step(&store), Some(BootstrapStep::Network));
    assert_eq!(log.count("request_accounts"), 0);
}

#[tokio::test]
async fn test_no_authorized_account() {
    let mut wallet = MockWallet::on_chain(31337);
    wallet.accounts.clear();
    let log = wallet.log.clone();
    let bootstrap = bootstrap_for(wallet, 5);
    let store = SessionStore::new();
    let shutdown = Shutdown::new();

    let result = bootstrap.run(&store, shutdown.subscribe()).await;

    assert!(matches!(result, Err(BootstrapError::NoAccountAuthorized)));
    assert_eq!(failed_step(&store), Some(BootstrapStep::Account));
    assert_eq!(log.count("code_at"), 0);
}

#[tokio::test]
async fn test_unsupported_network_fails_fast() {
    let wallet = MockWallet::on_chain(1);
    let log = wallet.log.clone();
    let bootstrap = bootstrap_for(wallet, 5);
    let store = SessionStore::new();
    let shutdown = Shutdown::new();

    let result = bootstrap.run(&store, shutdown.subscribe()).await;

    assert!(matches!(result, Err(BootstrapError::UnsupportedNetwork(1))));
    assert_eq!(failed_step(&store), Some(BootstrapStep::Token));
    assert_eq!(
        store.snapshot().actions,
        vec![StoreAction::SetProvider, StoreAction::SetNetwork, StoreAction::SetAccount]
    );
    assert_eq!(log.count("code_at"), 0);
}

#[tokio::test]
async fn test_missing_code_fails_binding() {
    let mut wallet = MockWallet::on_chain(31337);
    wallet.code = Bytes::new();
    let bootstrap = bootstrap_for(wallet, 5);
    let store = SessionStore::new();
    let shutdown = Shutdown::new();

    let result = bootstrap.run(&store, shutdown.subscribe()).await;

    match result {
        Err(BootstrapError::ContractBindingFailed { contract, reason }) => {
            assert_eq!(contract, ContractKind::Token);
            assert!(reason.contains("no code deployed"));
        }
        other => panic!("unexpected result: {:?}", other),
    }
    assert!(store.snapshot().token.is_none());
}

#[tokio::test]
async fn test_verification_can_be_disabled() {
    let mut wallet = MockWallet::on_chain(31337);
    wallet.code = Bytes::new();
    let log = wallet.log.clone();
    let mut config = common::bootstrap_config(5);
    config.verify_deployment = false;
    let bootstrap = Bootstrap::new(Arc::new(wallet), common::hardhat_registry(), config);
    let store = SessionStore::new();
    let shutdown = Shutdown::new();

    let session = bootstrap.run(&store, shutdown.subscribe()).await.unwrap();

    assert!(session.is_ready());
    assert_eq!(log.count("code_at"), 0);
}

#[tokio::test]
async fn test_hung_step_times_out() {
    let mut wallet = MockWallet::on_chain(31337);
    wallet.hang_accounts = true;
    let bootstrap = bootstrap_for(wallet, 1);
    let store = SessionStore::new();
    let shutdown = Shutdown::new();

    let result = bootstrap.run(&store, shutdown.subscribe()).await;

    assert!(matches!(
        result,
        Err(BootstrapError::Timeout { step: BootstrapStep::Account, secs: 1 })
    ));
    assert_eq!(failed_step(&store), Some(BootstrapStep::Account));
}

#[tokio::test]
async fn test_shutdown_cancels_pending_step() {
    let mut wallet = MockWallet::on_chain(31337);
    wallet.hang_accounts = true;
    // No step timeout: only shutdown can end the hung prompt.
    let bootstrap = Arc::new(bootstrap_for(wallet, 0));
    let store = SessionStore::new();
    let shutdown = Shutdown::new();

    let task = {
        let bootstrap = bootstrap.clone();
        let store = store.clone();
        let signal = shutdown.subscribe();
        tokio::spawn(async move { bootstrap.run(&store, signal).await })
    };

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(store.phase(), BootstrapPhase::AccountLoading);
    shutdown.trigger();

    let result = tokio::time::timeout(Duration::from_secs(2), task)
        .await
        .unwrap()
        .unwrap();
    assert!(matches!(result, Err(BootstrapError::Cancelled(BootstrapStep::Account))));
    assert_eq!(failed_step(&store), Some(BootstrapStep::Account));
}

#[tokio::test]
async fn test_account_step_needs_no_provider() {
    let wallet = MockWallet::on_chain(31337);
    let log = wallet.log.clone();
    let store = SessionStore::new();

    let account = bootstrap::load_account(&wallet, &store).await.unwrap();

    assert_eq!(account, HARDHAT_ACCOUNT);
    assert_eq!(log.entries(), vec!["request_accounts".to_string()]);
    let session = store.snapshot();
    assert!(session.provider.is_none());
    assert_eq!(session.actions, vec![StoreAction::SetAccount]);
}
