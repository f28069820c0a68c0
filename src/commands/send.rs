//! `send`: transfer tokens from the signer.

use std::io::Write;

use clap::Args;

use crate::cli::Prompt;
use crate::commands::{CommandError, CommandResult, Session};
use crate::token::input::parse_address;
use crate::token::units::short_address;
use crate::token::TokenApi;

#[derive(Debug, Clone, Default, Args)]
pub struct SendArgs {
    /// Recipient address
    #[arg(requires = "amount")]
    pub recipient: Option<String>,
    /// Amount in whole tokens (e.g. 1.5)
    pub amount: Option<String>,
}

pub async fn run<T: TokenApi, P: Prompt, W: Write>(
    s: &mut Session<T, P, W>,
    args: SendArgs,
) -> CommandResult<()> {
    let signer = s.signer();

    let (recipient, amount) = match (args.recipient, args.amount) {
        (Some(recipient), Some(amount)) => {
            let recipient = parse_address(&recipient)?;
            let amount = s.parse_amount(&amount)?;

            s.banner("Token Sender")?;
            let balance = s.token.balance_of(signer).await?;
            s.line(format!("💰 Balance: {}", s.fmt_amount(balance)))?;
            if amount > balance {
                return Err(CommandError::Precondition(format!(
                    "Insufficient balance. You have {}",
                    s.fmt_amount(balance)
                )));
            }
            (recipient, amount)
        }
        _ => {
            s.banner("Token Sender")?;
            let balance = s.token.balance_of(signer).await?;
            s.line(format!("💰 Your Balance: {}\n", s.fmt_amount(balance)))?;
            if balance.is_zero() {
                return Err(CommandError::Precondition(
                    "Insufficient balance to send tokens".to_string(),
                ));
            }

            let recipient = s.ask_address("Enter recipient address:")?;
            let message = format!("Enter amount to send ({}):", s.config.token.symbol);
            let amount = s.ask_amount(&message, Some(balance))?;
            if !s.confirm("Confirm transaction?")? {
                return Ok(());
            }
            (recipient, amount)
        }
    };

    s.line(format!(
        "\n📤 Sending {} to {}...",
        s.fmt_amount(amount),
        short_address(recipient)
    ))?;
    let tx_hash = s.token.transfer(recipient, amount).await?;
    let settled = s.settle(tx_hash, "Transaction failed").await?;

    s.line("\n✅ Transaction successful!")?;
    s.line(format!("📤 Sent: {}", s.fmt_amount(amount)))?;
    s.line(format!("👤 To: {}", short_address(recipient)))?;
    s.receipt_footer(&settled)?;

    let new_balance = s.token.balance_of(signer).await?;
    s.line(format!("💰 New Balance: {}", s.fmt_amount(new_balance)))
}
