//! `mint`: create tokens (owner only).

use std::io::Write;

use clap::Args;

use crate::cli::Prompt;
use crate::commands::{CommandResult, Session};
use crate::token::input::parse_address;
use crate::token::units::short_address;
use crate::token::TokenApi;

#[derive(Debug, Clone, Default, Args)]
pub struct MintArgs {
    /// Recipient address
    #[arg(requires = "amount")]
    pub recipient: Option<String>,
    /// Amount in whole tokens
    pub amount: Option<String>,
}

pub async fn run<T: TokenApi, P: Prompt, W: Write>(
    s: &mut Session<T, P, W>,
    args: MintArgs,
) -> CommandResult<()> {
    let direct = match (args.recipient, args.amount) {
        (Some(recipient), Some(amount)) => Some((parse_address(&recipient)?, s.parse_amount(&amount)?)),
        _ => None,
    };

    s.banner("Token Minter (Owner Only)")?;
    s.ensure_owner("mint tokens").await?;

    let supply_before = s.token.total_supply().await?;
    s.line(format!("📈 Current Total Supply: {}\n", s.fmt_amount(supply_before)))?;

    let (recipient, amount) = match direct {
        Some(direct) => direct,
        None => {
            let recipient = s.ask_address("Enter recipient address:")?;
            let message = format!("Enter amount to mint ({}):", s.config.token.symbol);
            let amount = s.ask_amount(&message, None)?;
            if !s.confirm("Confirm minting transaction?")? {
                return Ok(());
            }
            (recipient, amount)
        }
    };

    let recipient_before = s.token.balance_of(recipient).await?;

    s.line(format!(
        "\n🪙 Minting {} to {}...",
        s.fmt_amount(amount),
        short_address(recipient)
    ))?;
    let tx_hash = s.token.mint(recipient, amount).await?;
    let settled = s.settle(tx_hash, "Minting failed").await?;

    s.line("\n✅ Minting successful!")?;
    s.line(format!("🪙 Minted: {}", s.fmt_amount(amount)))?;
    s.line(format!("👤 To: {}", short_address(recipient)))?;
    s.receipt_footer(&settled)?;

    let supply_after = s.token.total_supply().await?;
    let recipient_after = s.token.balance_of(recipient).await?;
    s.line("\n📊 Updated Information:")?;
    s.line(format!("📈 New Total Supply: {}", s.fmt_amount(supply_after)))?;
    s.line(format!(
        "💰 Recipient Balance: {} (was {})",
        s.fmt_amount(recipient_after),
        s.fmt_amount(recipient_before)
    ))
}
