//! `burn`: destroy tokens held by the signer.

use std::io::Write;

use clap::Args;

use crate::cli::Prompt;
use crate::commands::{CommandError, CommandResult, Session};
use crate::token::TokenApi;

#[derive(Debug, Clone, Default, Args)]
pub struct BurnArgs {
    /// Amount in whole tokens
    pub amount: Option<String>,
}

pub async fn run<T: TokenApi, P: Prompt, W: Write>(
    s: &mut Session<T, P, W>,
    args: BurnArgs,
) -> CommandResult<()> {
    let signer = s.signer();
    let direct_amount = args.amount.as_deref().map(|a| s.parse_amount(a)).transpose()?;

    s.banner("Token Burner")?;
    let balance = s.token.balance_of(signer).await?;
    s.line(format!("💰 Your Balance: {}\n", s.fmt_amount(balance)))?;

    if balance.is_zero() {
        return Err(CommandError::Precondition(
            "Insufficient balance to burn tokens".to_string(),
        ));
    }
    if s.token.paused().await? {
        return Err(CommandError::Precondition(
            "Contract is paused. Cannot burn tokens.".to_string(),
        ));
    }

    let amount = match direct_amount {
        Some(amount) => {
            if amount > balance {
                return Err(CommandError::Precondition(format!(
                    "Insufficient balance. You have {}",
                    s.fmt_amount(balance)
                )));
            }
            amount
        }
        None => {
            let message = format!("Enter amount to burn ({}):", s.config.token.symbol);
            let amount = s.ask_amount(&message, Some(balance))?;
            s.line("⚠️  Burned tokens are permanently removed from circulation")?;
            if !s.confirm("Confirm burning transaction?")? {
                return Ok(());
            }
            amount
        }
    };

    let supply_before = s.token.total_supply().await?;

    s.line(format!("\n🔥 Burning {}...", s.fmt_amount(amount)))?;
    let tx_hash = s.token.burn(amount).await?;
    let settled = s.settle(tx_hash, "Burning failed").await?;

    s.line("\n✅ Burning successful!")?;
    s.line(format!("🔥 Burned: {}", s.fmt_amount(amount)))?;
    s.receipt_footer(&settled)?;

    let new_balance = s.token.balance_of(signer).await?;
    let new_supply = s.token.total_supply().await?;
    s.line("\n📊 Updated Information:")?;
    s.line(format!("💰 New Balance: {}", s.fmt_amount(new_balance)))?;
    s.line(format!(
        "📉 New Total Supply: {} (was {})",
        s.fmt_amount(new_supply),
        s.fmt_amount(supply_before)
    ))
}
