//! User input validation.
//!
//! Every command argument passes through here before any RPC call is made.

use alloy::primitives::{Address, Bytes, U256};
use thiserror::Error;

/// Errors produced while validating user input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Invalid address checksum: {0}")]
    BadChecksum(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid amount: {amount} has more than {decimals} decimal places")]
    TooManyDecimals { amount: String, decimals: u8 },

    #[error("Invalid amount: {0} is too large")]
    AmountOverflow(String),

    #[error("Invalid call data: {0}")]
    InvalidCallData(String),

    #[error("Please enter a number between 1 and {max}")]
    InvalidLimit { max: usize },
}

/// Parse a hex address, `0x` optional.
///
/// All-lowercase and all-uppercase input is accepted as is; mixed-case input
/// must carry a valid EIP-55 checksum.
pub fn parse_address(text: &str) -> Result<Address, InputError> {
    let trimmed = text.trim();
    let body = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    if body.len() != 40 || !body.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(InputError::InvalidAddress(trimmed.to_string()));
    }

    let bytes = alloy::hex::decode(body).map_err(|_| InputError::InvalidAddress(trimmed.to_string()))?;
    let address = Address::from_slice(&bytes);

    let has_lower = body.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = body.chars().any(|c| c.is_ascii_uppercase());
    if has_lower && has_upper && address.to_checksum(None)[2..] != *body {
        return Err(InputError::BadChecksum(trimmed.to_string()));
    }

    Ok(address)
}

/// Parse a positive decimal token amount into base units.
pub fn parse_amount(text: &str, decimals: u8) -> Result<U256, InputError> {
    let trimmed = text.trim();
    let (whole, fraction) = trimmed.split_once('.').unwrap_or((trimmed, ""));

    let is_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if (whole.is_empty() && fraction.is_empty()) || !is_digits(whole) || !is_digits(fraction) {
        return Err(InputError::InvalidAmount(trimmed.to_string()));
    }

    if fraction.len() > decimals as usize {
        return Err(InputError::TooManyDecimals {
            amount: trimmed.to_string(),
            decimals,
        });
    }

    let digits = format!("{}{:0<width$}", whole, fraction, width = decimals as usize);
    let digits = digits.trim_start_matches('0');
    if digits.is_empty() {
        return Err(InputError::InvalidAmount(trimmed.to_string()));
    }

    U256::from_str_radix(digits, 10).map_err(|_| InputError::AmountOverflow(trimmed.to_string()))
}

/// Parse optional hex call data; empty input and a bare `0x` mean no data.
pub fn parse_call_data(text: &str) -> Result<Bytes, InputError> {
    let trimmed = text.trim();
    let body = trimmed.strip_prefix("0x").unwrap_or(trimmed);
    if body.is_empty() {
        return Ok(Bytes::new());
    }
    alloy::hex::decode(body)
        .map(Bytes::from)
        .map_err(|e| InputError::InvalidCallData(format!("{} ({})", trimmed, e)))
}

/// Parse a history limit in `1..=max`.
pub fn parse_limit(text: &str, max: usize) -> Result<usize, InputError> {
    match text.trim().parse::<usize>() {
        Ok(n) if (1..=max).contains(&n) => Ok(n),
        _ => Err(InputError::InvalidLimit { max }),
    }
}
