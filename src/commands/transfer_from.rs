//! `transfer-from`: move tokens on someone else's behalf using an allowance.

use std::io::Write;

use clap::Args;

use crate::cli::Prompt;
use crate::commands::{CommandError, CommandResult, Session};
use crate::token::input::parse_address;
use crate::token::units::short_address;
use crate::token::TokenApi;

#[derive(Debug, Clone, Default, Args)]
pub struct TransferFromArgs {
    /// Address the tokens are taken from
    #[arg(requires_all = ["to", "amount"])]
    pub from: Option<String>,
    /// Recipient address
    pub to: Option<String>,
    /// Amount in whole tokens
    pub amount: Option<String>,
}

pub async fn run<T: TokenApi, P: Prompt, W: Write>(
    s: &mut Session<T, P, W>,
    args: TransferFromArgs,
) -> CommandResult<()> {
    let signer = s.signer();

    let (from, to, amount) = match (args.from, args.to, args.amount) {
        (Some(from), Some(to), Some(amount)) => {
            let parsed = (parse_address(&from)?, parse_address(&to)?, s.parse_amount(&amount)?);
            s.banner("Transfer From")?;
            parsed
        }
        _ => {
            s.banner("Transfer From")?;
            let from = s.ask_address("Enter address to transfer from:")?;
            let to = s.ask_address("Enter recipient address:")?;
            let message = format!("Enter amount to transfer ({}):", s.config.token.symbol);
            let amount = s.ask_amount(&message, None)?;
            if !s.confirm("Confirm transfer transaction?")? {
                return Ok(());
            }
            (from, to, amount)
        }
    };

    s.line("\n📊 Checking balances and allowances...")?;
    let from_balance = s.token.balance_of(from).await?;
    let to_balance = s.token.balance_of(to).await?;
    let allowance = s.token.allowance(from, signer).await?;
    s.line(format!("💰 From Balance: {}", s.fmt_amount(from_balance)))?;
    s.line(format!("💰 To Balance: {}", s.fmt_amount(to_balance)))?;
    s.line(format!("✅ Allowance: {}", s.fmt_amount(allowance)))?;

    if from_balance < amount {
        return Err(CommandError::Precondition(format!(
            "Insufficient balance. From address has {}",
            s.fmt_amount(from_balance)
        )));
    }
    if allowance < amount {
        return Err(CommandError::Precondition(format!(
            "Insufficient allowance. You can transfer {}",
            s.fmt_amount(allowance)
        )));
    }

    s.line(format!(
        "\n🔄 Transferring {} from {} to {}...",
        s.fmt_amount(amount),
        short_address(from),
        short_address(to)
    ))?;
    let tx_hash = s.token.transfer_from(from, to, amount).await?;
    let settled = s.settle(tx_hash, "Transfer failed").await?;

    s.line("\n✅ Transfer successful!")?;
    s.line(format!("🔄 Transferred: {}", s.fmt_amount(amount)))?;
    s.line(format!("👤 From: {}", short_address(from)))?;
    s.line(format!("👤 To: {}", short_address(to)))?;
    s.receipt_footer(&settled)?;

    let new_from = s.token.balance_of(from).await?;
    let new_to = s.token.balance_of(to).await?;
    let new_allowance = s.token.allowance(from, signer).await?;
    s.line("\n📊 Updated Information:")?;
    s.line(format!("💰 From Balance: {}", s.fmt_amount(new_from)))?;
    s.line(format!("💰 To Balance: {}", s.fmt_amount(new_to)))?;
    s.line(format!(
        "✅ New Allowance: {} (was {})",
        s.fmt_amount(new_allowance),
        s.fmt_amount(allowance)
    ))
}
