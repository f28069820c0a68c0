//! `approve`: set a spender's allowance over the signer's tokens.

use std::io::Write;

use clap::Args;

use crate::cli::Prompt;
use crate::commands::{CommandResult, Session};
use crate::token::input::parse_address;
use crate::token::units::short_address;
use crate::token::TokenApi;

#[derive(Debug, Clone, Default, Args)]
pub struct ApproveArgs {
    /// Spender address
    #[arg(requires = "amount")]
    pub spender: Option<String>,
    /// Allowance in whole tokens
    pub amount: Option<String>,
}

pub async fn run<T: TokenApi, P: Prompt, W: Write>(
    s: &mut Session<T, P, W>,
    args: ApproveArgs,
) -> CommandResult<()> {
    let signer = s.signer();

    let (spender, amount) = match (args.spender, args.amount) {
        (Some(spender), Some(amount)) => {
            let spender = parse_address(&spender)?;
            let amount = s.parse_amount(&amount)?;
            s.banner("Token Approval")?;
            (spender, amount)
        }
        _ => {
            s.banner("Token Approval")?;
            let balance = s.token.balance_of(signer).await?;
            s.line(format!("💰 Your Balance: {}\n", s.fmt_amount(balance)))?;

            let spender = s.ask_address("Enter spender address:")?;
            let message = format!("Enter amount to approve ({}):", s.config.token.symbol);
            let amount = s.ask_amount(&message, None)?;
            if !s.confirm("Confirm approval transaction?")? {
                return Ok(());
            }
            (spender, amount)
        }
    };

    let previous = s.token.allowance(signer, spender).await?;

    s.line("\n✅ Approving tokens...")?;
    let tx_hash = s.token.approve(spender, amount).await?;
    let settled = s.settle(tx_hash, "Approval failed").await?;

    s.line("\n✅ Approval successful!")?;
    s.line(format!("✅ Approved: {}", s.fmt_amount(amount)))?;
    s.line(format!("👤 Spender: {}", short_address(spender)))?;
    s.receipt_footer(&settled)?;

    let current = s.token.allowance(signer, spender).await?;
    s.line(format!(
        "💰 New Allowance: {} (was {})",
        s.fmt_amount(current),
        s.fmt_amount(previous)
    ))
}
