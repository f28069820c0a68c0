//! `history`: sent/received summary and recent transfers for an address.

use std::io::Write;

use alloy::primitives::Address;
use clap::Args;

use crate::cli::Prompt;
use crate::commands::{CommandResult, Session};
use crate::token::history::{Direction, HistoryEntry};
use crate::token::input::{parse_address, parse_limit};
use crate::token::units::{format_units, short_address, short_hash};
use crate::token::{HistoryReport, TokenApi, TransferQuery};

#[derive(Debug, Clone, Default, Args)]
pub struct HistoryArgs {
    /// Address to inspect (defaults to the signer)
    pub address: Option<String>,
    /// Number of transfers to list
    #[arg(short, long)]
    pub limit: Option<String>,
    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Query both sides of the `Transfer` log for `address` and merge them.
pub async fn fetch_report<T: TokenApi>(
    token: &T,
    address: Address,
    limit: usize,
) -> CommandResult<HistoryReport> {
    let sent = token.transfer_events(TransferQuery::sent_by(address)).await?;
    let received = token.transfer_events(TransferQuery::received_by(address)).await?;
    tracing::debug!(
        address = %address,
        sent = sent.len(),
        received = received.len(),
        "Fetched transfer logs"
    );
    Ok(HistoryReport::build(address, sent, received, limit))
}

/// `📤 -1.5 EDT to 0x1234...abcd`
pub fn describe_entry(entry: &HistoryEntry, decimals: u8, symbol: &str) -> String {
    let (icon, sign, preposition) = match entry.direction {
        Direction::Sent => ("📤", "-", "to"),
        Direction::Received => ("📥", "+", "from"),
    };
    format!(
        "{} {}{} {} {} {}",
        icon,
        sign,
        format_units(entry.value, decimals),
        symbol,
        preposition,
        short_address(entry.counterparty)
    )
}

/// Short "Recent Transactions" block used by `balance` and `info`.
///
/// Log query failures are reported inline rather than aborting the command.
pub async fn print_recent<T: TokenApi, P: Prompt, W: Write>(
    s: &mut Session<T, P, W>,
    address: Address,
    limit: usize,
    with_block: bool,
) -> CommandResult<()> {
    s.line("\n📜 Recent Transactions:")?;

    let report = match fetch_report(&s.token, address, limit).await {
        Ok(report) => report,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to fetch transfer logs");
            return s.line("   Could not fetch recent transactions");
        }
    };

    if report.entries.is_empty() {
        return s.line("   No recent transactions");
    }

    let decimals = s.config.token.decimals;
    let symbol = s.config.token.symbol.clone();
    for entry in &report.entries {
        let text = describe_entry(entry, decimals, &symbol);
        if with_block {
            s.line(format!("   {} (Block: {})", text, entry.block_number))?;
        } else {
            s.line(format!("   {}", text))?;
        }
    }
    Ok(())
}

pub async fn run<T: TokenApi, P: Prompt, W: Write>(
    s: &mut Session<T, P, W>,
    args: HistoryArgs,
) -> CommandResult<()> {
    let signer = s.signer();
    let max_limit = s.config.history.max_limit;
    let direct_limit = args
        .limit
        .as_deref()
        .map(|l| parse_limit(l, max_limit))
        .transpose()?;

    let (address, limit) = match args.address {
        Some(address) => {
            let address = parse_address(&address)?;
            if !args.json {
                s.banner("Transaction History")?;
            }
            (address, direct_limit.unwrap_or(s.config.history.default_limit))
        }
        None if args.json => (signer, direct_limit.unwrap_or(s.config.history.default_limit)),
        None => {
            s.banner("Transaction History")?;
            let address =
                s.ask_address_or("Enter address to check (or press Enter for your address):", signer)?;
            let limit = match direct_limit {
                Some(limit) => limit,
                None => ask_limit(s)?,
            };
            (address, limit)
        }
    };

    if args.json {
        let report = fetch_report(&s.token, address, limit).await?;
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        return s.line(json);
    }

    let balance = s.token.balance_of(address).await?;
    s.line(format!("👤 Address: {}", address))?;
    s.line(format!("💰 Current Balance: {}\n", s.fmt_amount(balance)))?;

    s.line("📤 Fetching sent transactions...")?;
    s.line("📥 Fetching received transactions...")?;
    let report = fetch_report(&s.token, address, limit).await?;

    if report.total_transfers == 0 {
        return s.line("📜 No transactions found for this address");
    }

    s.line("\n📊 Transaction Summary:")?;
    s.line(format!("📤 Total Sent: {} transactions", report.sent_count))?;
    s.line(format!("📥 Total Received: {} transactions", report.received_count))?;
    s.line(format!("📜 Total Transactions: {}", report.total_transfers))?;
    s.line(format!("📤 Total Amount Sent: {}", s.fmt_amount(report.total_sent)))?;
    s.line(format!("📥 Total Amount Received: {}", s.fmt_amount(report.total_received)))?;

    s.line("\n📜 Recent Transactions:")?;
    let decimals = s.config.token.decimals;
    let symbol = s.config.token.symbol.clone();
    for (i, entry) in report.entries.iter().enumerate() {
        let url = s.config.tx_url(entry.tx_hash);
        s.line(format!("{}. {}", i + 1, describe_entry(entry, decimals, &symbol)))?;
        s.line(format!(
            "   Block: {} | Hash: {}",
            entry.block_number,
            short_hash(entry.tx_hash)
        ))?;
        s.line(format!("   Explorer: {}", url))?;
        s.console.blank()?;
    }

    if report.omitted > 0 {
        s.line(format!("... and {} more transactions", report.omitted))?;
    }
    Ok(())
}

fn ask_limit<T: TokenApi, P: Prompt, W: Write>(s: &mut Session<T, P, W>) -> CommandResult<usize> {
    let max = s.config.history.max_limit;
    let default = s.config.history.default_limit.to_string();
    let message = format!("Number of transactions to show (default: {}):", default);
    loop {
        let answer = s.prompt.input(&message, Some(&default))?;
        match parse_limit(&answer, max) {
            Ok(limit) => return Ok(limit),
            Err(e) => s.line(format!("❌ {}", e))?,
        }
    }
}
