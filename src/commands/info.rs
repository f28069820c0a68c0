//! `info`: token metadata, signer position, network and contract features.

use std::io::Write;

use crate::cli::Prompt;
use crate::commands::history::print_recent;
use crate::commands::{CommandResult, Session};
use crate::config::RpcEndpoint;
use crate::token::units::{share_of_supply, short_address};
use crate::token::TokenApi;

const RECENT_TRANSFERS: usize = 10;

const CAPABILITIES: [&str; 7] = [
    "✅ ERC20: Basic token functionality",
    "🔥 ERC20Burnable: Tokens can be burned",
    "⏸️  ERC20Pausable: Transfers can be paused",
    "👑 Ownable: Access control for owner functions",
    "🔗 ERC1363: Payable tokens with callbacks",
    "✍️  ERC20Permit: Gasless approvals",
    "⚡ ERC20FlashMint: Flash loan functionality",
];

pub async fn run<T: TokenApi, P: Prompt, W: Write>(
    s: &mut Session<T, P, W>,
    endpoint: &RpcEndpoint,
) -> CommandResult<()> {
    let signer = s.signer();
    s.banner("Token Information")?;

    s.line("📊 Fetching token information...")?;
    let name = s.token.name().await?;
    let symbol = s.token.symbol().await?;
    let decimals = s.token.decimals().await?;
    let supply = s.token.total_supply().await?;

    s.line("📋 Basic Token Information:")?;
    s.line(format!("🏷️  Name: {}", name))?;
    s.line(format!("💎 Symbol: {}", symbol))?;
    s.line(format!("🔢 Decimals: {}", decimals))?;
    s.line(format!("📈 Total Supply: {}", s.fmt_amount(supply)))?;

    match s.token.owner().await {
        Ok(owner) => {
            s.line(format!("👑 Owner: {}", short_address(owner)))?;
            if owner == signer {
                s.line("   ✅ You are the contract owner!")?;
            }
        }
        Err(_) => s.line("👑 Owner: Not available")?,
    }

    match s.token.paused().await {
        Ok(paused) => s.line(format!(
            "📊 Status: {}",
            if paused { "⏸️  Paused" } else { "✅ Active" }
        ))?,
        Err(_) => s.line("📊 Status: Not available")?,
    }

    let balance = s.token.balance_of(signer).await?;
    s.line("\n💰 Your Information:")?;
    s.line(format!("👤 Address: {}", signer))?;
    s.line(format!("💰 Balance: {}", s.fmt_amount(balance)))?;
    s.line(format!("📊 Percentage of Total Supply: {}%", share_of_supply(balance, supply)))?;

    print_recent(s, signer, RECENT_TRANSFERS, true).await?;

    let contract = s.token.contract_address();
    let network = s.config.network.name.clone();
    let explorer = s.config.network.explorer_url.clone();
    s.line("\n🌐 Network Information:")?;
    s.line(format!("🌐 Network: {} (chain {})", network, s.token.chain_id()))?;
    s.line(format!("🔗 RPC URL: {} ({})", endpoint.masked(), endpoint.source))?;
    s.line(format!("🔍 Explorer: {}", explorer))?;
    s.line(format!("📄 Contract: {}", contract))?;

    s.line("\n🔧 Contract Capabilities:")?;
    for capability in CAPABILITIES {
        s.line(capability)?;
    }
    Ok(())
}
