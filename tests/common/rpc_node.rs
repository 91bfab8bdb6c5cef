//! Minimal JSON-RPC node served over HTTP for `RpcWallet` tests.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};

use super::{CallLog, HARDHAT_ACCOUNT};

/// Canned answers for the methods the wallet uses.
#[derive(Debug, Clone)]
pub struct NodeConfig {
    pub chain_id: u64,
    pub accounts: Vec<String>,
    /// Hex bytecode returned by `eth_getCode` for every address.
    pub code: String,
    /// Delay before answering `eth_accounts`.
    pub accounts_delay: Duration,
}

impl NodeConfig {
    /// Hardhat node with one unlocked account and code deployed everywhere.
    pub fn hardhat() -> Self {
        Self {
            chain_id: 31337,
            accounts: vec![HARDHAT_ACCOUNT.to_string()],
            code: "0x60806040".to_string(),
            accounts_delay: Duration::ZERO,
        }
    }
}

struct NodeState {
    config: NodeConfig,
    log: CallLog,
}

/// Running node; every request is recorded by method name.
pub struct RpcNode {
    pub addr: SocketAddr,
    pub log: CallLog,
}

impl RpcNode {
    pub async fn start(config: NodeConfig) -> Self {
        let log = CallLog::default();
        let state = Arc::new(NodeState {
            config,
            log: log.clone(),
        });
        let router = Router::new().route("/", post(handle)).with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self { addr, log }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn methods(&self) -> Vec<String> {
        self.log.entries()
    }
}

async fn handle(State(node): State<Arc<NodeState>>, Json(request): Json<Value>) -> Json<Value> {
    let method = request["method"].as_str().unwrap_or_default().to_string();
    node.log.push(method.clone());
    let config = &node.config;

    let result = match method.as_str() {
        "eth_chainId" => json!(format!("0x{:x}", config.chain_id)),
        "eth_accounts" => {
            tokio::time::sleep(config.accounts_delay).await;
            json!(config.accounts)
        }
        "eth_getCode" => json!(config.code),
        _ => {
            return Json(json!({
                "jsonrpc": "2.0",
                "id": request["id"].clone(),
                "error": { "code": -32601, "message": "method not found" },
            }))
        }
    };

    Json(json!({
        "jsonrpc": "2.0",
        "id": request["id"].clone(),
        "result": result,
    }))
}
