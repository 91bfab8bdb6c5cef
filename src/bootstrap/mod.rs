//! Blockchain bootstrap subsystem.
//!
//! # Data Flow
//! ```text
//! Bootstrap::run (runner.rs)
//!     → load_provider  (wallet connection)       → set_provider
//!     → load_network   (provider chain ID)       → set_network
//!     → load_account   (wallet accounts)         → set_account
//!     → load_tokens    (registry[chain] + bind)  → set_token_contract
//!     → load_amm       (registry[chain] + bind)  → set_amm_contract
//!     → Ready | Failed
//! ```
//!
//! # Design Decisions
//! - Strictly serial: each step is awaited before the next begins
//! - No retries; the first error stops the sequence
//! - Every step races a timeout and the shutdown signal

pub mod error;
pub mod runner;
pub mod steps;

pub use error::{BootstrapError, BootstrapResult};
pub use runner::Bootstrap;
pub use steps::{load_account, load_amm, load_network, load_provider, load_tokens};
