//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, limits ordered)
//! - Check the contract address is configured and well-formed
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: CliConfig → Result<(), Vec<ValidationError>>
//! - Runs after the env layer so overrides are validated too

use std::fmt;

use alloy::primitives::Address;

use crate::config::schema::CliConfig;
use crate::token::input::parse_address;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a layered configuration.
pub fn validate_config(config: &CliConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let address = config.token.contract_address.trim();
    if address.is_empty() {
        errors.push(ValidationError::new(
            "token.contract_address",
            "Contract address not configured. Please set CONTRACT_ADDRESS in .env",
        ));
    } else {
        match parse_address(address) {
            Ok(parsed) if parsed == Address::ZERO => errors.push(ValidationError::new(
                "token.contract_address",
                "Contract address not configured. Please set CONTRACT_ADDRESS in .env",
            )),
            Ok(_) => {}
            Err(e) => errors.push(ValidationError::new("token.contract_address", e.to_string())),
        }
    }

    if let Some(rpc_url) = &config.network.rpc_url {
        match url::Url::parse(rpc_url) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
            Ok(parsed) => errors.push(ValidationError::new(
                "network.rpc_url",
                format!("unsupported scheme '{}', expected http or https", parsed.scheme()),
            )),
            Err(e) => errors.push(ValidationError::new(
                "network.rpc_url",
                format!("invalid URL '{}': {}", rpc_url, e),
            )),
        }
    }

    if url::Url::parse(&config.network.explorer_url).is_err() {
        errors.push(ValidationError::new(
            "network.explorer_url",
            format!("invalid URL '{}'", config.network.explorer_url),
        ));
    }

    if config.network.rpc_timeout_secs == 0 {
        errors.push(ValidationError::new("network.rpc_timeout_secs", "must be greater than 0"));
    }
    if config.network.confirmation_timeout_secs == 0 {
        errors.push(ValidationError::new(
            "network.confirmation_timeout_secs",
            "must be greater than 0",
        ));
    }
    if config.network.poll_interval_ms == 0 {
        errors.push(ValidationError::new("network.poll_interval_ms", "must be greater than 0"));
    }

    // 10^78 overflows uint256
    if config.token.decimals > 77 {
        errors.push(ValidationError::new("token.decimals", "must be at most 77"));
    }

    if config.history.max_limit == 0 {
        errors.push(ValidationError::new("history.max_limit", "must be greater than 0"));
    } else if config.history.default_limit == 0 || config.history.default_limit > config.history.max_limit {
        errors.push(ValidationError::new(
            "history.default_limit",
            format!("must be between 1 and {}", config.history.max_limit),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
