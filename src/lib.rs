//! dApp client bootstrap library.
//!
//! Connects to a wallet, resolves the network and account, binds the token
//! and AMM contracts configured for that network, and serves a placeholder
//! page while doing so.

pub mod blockchain;
pub mod bootstrap;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod session;

pub use bootstrap::{Bootstrap, BootstrapError};
pub use config::schema::AppConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use session::SessionStore;
