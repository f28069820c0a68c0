//! `balance`: token balance and contract status for an address.

use std::io::Write;

use clap::Args;

use crate::cli::Prompt;
use crate::commands::history::print_recent;
use crate::commands::{CommandResult, Session};
use crate::token::input::parse_address;
use crate::token::units::share_of_supply;
use crate::token::TokenApi;

/// Transfers listed when the signer checks their own balance.
const RECENT_TRANSFERS: usize = 5;

#[derive(Debug, Clone, Default, Args)]
pub struct BalanceArgs {
    /// Address to check (defaults to the signer)
    pub address: Option<String>,
}

pub async fn run<T: TokenApi, P: Prompt, W: Write>(
    s: &mut Session<T, P, W>,
    args: BalanceArgs,
) -> CommandResult<()> {
    let signer = s.signer();

    let address = match args.address {
        Some(address) => {
            let address = parse_address(&address)?;
            s.banner("Token Balance Checker")?;
            address
        }
        None => {
            s.banner("Token Balance Checker")?;
            s.ask_address_or("Enter address to check (or press Enter for your address):", signer)?
        }
    };

    s.line("📊 Fetching balance...")?;
    let balance = s.token.balance_of(address).await?;
    let supply = s.token.total_supply().await?;

    s.line("\n📊 Balance Information:")?;
    s.line(format!("👤 Address: {}", address))?;
    s.line(format!("💰 Balance: {}", s.fmt_amount(balance)))?;
    s.line(format!("📈 Total Supply: {}", s.fmt_amount(supply)))?;
    s.line(format!("📊 Percentage: {}%", share_of_supply(balance, supply)))?;

    let info = async {
        let name = s.token.name().await?;
        let symbol = s.token.symbol().await?;
        let decimals = s.token.decimals().await?;
        Ok::<_, crate::blockchain::BlockchainError>((name, symbol, decimals))
    }
    .await;
    match info {
        Ok((name, symbol, decimals)) => {
            s.line("\n📋 Token Information:")?;
            s.line(format!("🏷️  Name: {}", name))?;
            s.line(format!("💎 Symbol: {}", symbol))?;
            s.line(format!("🔢 Decimals: {}", decimals))?;
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to fetch token metadata");
            s.line("\n⚠️  Could not fetch token information")?;
        }
    }

    if let Ok(owner) = s.token.owner().await {
        if owner == address {
            s.line("\n👑 This address is the contract owner!")?;
        }
    }

    if let Ok(paused) = s.token.paused().await {
        if paused {
            s.line("\n⏸️  Contract is currently paused")?;
        } else {
            s.line("\n✅ Contract is active")?;
        }
    }

    if address == signer {
        print_recent(s, address, RECENT_TRANSFERS, false).await?;
    }
    Ok(())
}
