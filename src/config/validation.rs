//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate endpoint URLs, addresses and bind addresses
//! - Detect duplicate network entries
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use alloy::primitives::Address;
use thiserror::Error;

use crate::config::schema::AppConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Characters the page template would treat as markup.
const MARKUP_CHARS: [char; 3] = ['<', '>', '"'];

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid RPC URL '{url}': {reason}")]
    InvalidRpcUrl { url: String, reason: String },

    #[error("{field} must be greater than zero")]
    ZeroValue { field: &'static str },

    #[error("invalid bind address for {field}: '{value}'")]
    InvalidBindAddress { field: &'static str, value: String },

    #[error("server.title must be plain text: '{0}'")]
    MarkupInTitle(String),

    #[error("unknown log level '{0}'")]
    UnknownLogLevel(String),

    #[error("chain {0} is configured more than once")]
    DuplicateNetwork(u64),

    #[error("chain {chain_id}: invalid {contract} address '{value}'")]
    InvalidAddress {
        chain_id: u64,
        contract: &'static str,
        value: String,
    },
}

/// Validate a parsed configuration.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let wallet = &config.wallet;
    // An empty endpoint is allowed and means "no wallet installed".
    if !wallet.rpc_url.trim().is_empty() {
        check_url(&wallet.rpc_url, &mut errors);
    }
    for url in &wallet.failover_urls {
        check_url(url, &mut errors);
    }
    if wallet.rpc_timeout_secs == 0 {
        errors.push(ValidationError::ZeroValue { field: "wallet.rpc_timeout_secs" });
    }

    if config.server.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress {
            field: "server.bind_address",
            value: config.server.bind_address.clone(),
        });
    }
    if config.server.title.contains(&MARKUP_CHARS[..]) {
        errors.push(ValidationError::MarkupInTitle(config.server.title.clone()));
    }
    if config.server.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroValue { field: "server.request_timeout_secs" });
    }

    let observability = &config.observability;
    if !LOG_LEVELS.contains(&observability.log_level.to_lowercase().as_str()) {
        errors.push(ValidationError::UnknownLogLevel(observability.log_level.clone()));
    }
    if observability.metrics_enabled
        && observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidBindAddress {
            field: "observability.metrics_address",
            value: observability.metrics_address.clone(),
        });
    }

    let mut seen = HashSet::new();
    for network in &config.networks {
        if !seen.insert(network.chain_id) {
            errors.push(ValidationError::DuplicateNetwork(network.chain_id));
        }
        for (contract, value) in [("token", &network.token), ("amm", &network.amm)] {
            if value.parse::<Address>().is_err() {
                errors.push(ValidationError::InvalidAddress {
                    chain_id: network.chain_id,
                    contract,
                    value: value.clone(),
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_url(raw: &str, errors: &mut Vec<ValidationError>) {
    if let Err(e) = raw.parse::<url::Url>() {
        errors.push(ValidationError::InvalidRpcUrl {
            url: raw.to_string(),
            reason: e.to_string(),
        });
    }
}
