//! Amount and address formatting for display.

use alloy::primitives::{Address, TxHash, U256};

/// Format base units as a decimal string, keeping at least one fractional digit.
///
/// `1500000000000000000` with 18 decimals formats as `1.5`; whole amounts
/// format as `N.0`.
pub fn format_units(value: U256, decimals: u8) -> String {
    if decimals == 0 {
        return format!("{}.0", value);
    }

    let base = U256::from(10u64).pow(U256::from(decimals));
    let whole = value / base;
    let fraction = value % base;

    let fraction = format!("{:0>width$}", fraction.to_string(), width = decimals as usize);
    let fraction = fraction.trim_end_matches('0');
    let fraction = if fraction.is_empty() { "0" } else { fraction };

    format!("{}.{}", whole, fraction)
}

/// `0x1234...abcd` form of an address.
pub fn short_address(address: Address) -> String {
    let full = address.to_checksum(None);
    format!("{}...{}", &full[..6], &full[full.len() - 4..])
}

/// `0x12345678...90abcdef` form of a transaction hash.
pub fn short_hash(hash: TxHash) -> String {
    let full = hash.to_string();
    format!("{}...{}", &full[..10], &full[full.len() - 8..])
}

/// Percentage of `total` held by `balance`, with four decimals (truncated).
pub fn share_of_supply(balance: U256, total: U256) -> String {
    if total.is_zero() {
        return "0.0000".to_string();
    }

    let scaled = balance.saturating_mul(U256::from(1_000_000u64)) / total;
    let whole = scaled / U256::from(10_000u64);
    let fraction = u64::try_from(scaled % U256::from(10_000u64)).unwrap_or_default();

    format!("{}.{:04}", whole, fraction)
}
