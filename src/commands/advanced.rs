//! ERC1363, ERC2612 and ERC3156 extensions: permit, call-after-transfer
//! hooks and flash loans.
//!
//! These commands take their arguments on the command line only.

use std::io::Write;
use std::time::{SystemTime, UNIX_EPOCH};

use alloy::primitives::{Bytes, U256};
use clap::Args;

use crate::cli::Prompt;
use crate::commands::{CommandError, CommandResult, Session};
use crate::token::input::{parse_address, parse_call_data};
use crate::token::permit::{permit_digest, permit_domain, Permit};
use crate::token::units::short_address;
use crate::token::{SignedPermit, TokenApi};

/// Default permit validity window.
pub const DEFAULT_DEADLINE_SECS: u64 = 3600;

#[derive(Debug, Clone, Args)]
pub struct PermitArgs {
    /// Spender address
    pub spender: String,
    /// Allowance in whole tokens
    pub amount: String,
    /// Seconds from now until the signature expires
    #[arg(long, default_value_t = DEFAULT_DEADLINE_SECS)]
    pub deadline_secs: u64,
}

#[derive(Debug, Clone, Args)]
pub struct CallArgs {
    /// Recipient or spender contract
    pub target: String,
    /// Amount in whole tokens
    pub amount: String,
    /// Hex call data forwarded to the receiver hook
    #[arg(long)]
    pub data: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct FlashLoanArgs {
    /// ERC3156 borrower contract
    pub receiver: String,
    /// Amount in whole tokens
    pub amount: String,
    /// Hex data passed to `onFlashLoan`
    #[arg(long)]
    pub data: Option<String>,
}

fn call_data(data: Option<&str>) -> CommandResult<Bytes> {
    Ok(data.map(parse_call_data).transpose()?.unwrap_or_default())
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

/// Sign an EIP-2612 permit for `spender` and submit it.
pub async fn permit<T: TokenApi, P: Prompt, W: Write>(
    s: &mut Session<T, P, W>,
    args: PermitArgs,
) -> CommandResult<()> {
    let spender = parse_address(&args.spender)?;
    let value = s.parse_amount(&args.amount)?;
    let owner = s.signer();

    s.banner("Permit Signer")?;

    let name = s.token.name().await?;
    let domain = permit_domain(name, s.token.chain_id(), s.token.contract_address());
    let on_chain = s.token.domain_separator().await?;
    if domain.separator() != on_chain {
        tracing::warn!(local = %domain.separator(), on_chain = %on_chain, "Permit domain mismatch");
        return Err(CommandError::Precondition(
            "Permit domain does not match the contract (check CHAIN_ID and CONTRACT_ADDRESS)".to_string(),
        ));
    }

    let nonce = s.token.nonces(owner).await?;
    let deadline = U256::from(unix_now().saturating_add(args.deadline_secs));
    let message = Permit {
        owner,
        spender,
        value,
        nonce,
        deadline,
    };

    let digest = permit_digest(&domain, &message);
    let signature = s.token.sign_hash(digest).await?;
    let signed = SignedPermit::new(&message, &signature);
    tracing::debug!(%digest, %nonce, "Signed permit");

    s.line("✍️  Permit signed:")?;
    s.line(format!("👤 Spender: {}", short_address(spender)))?;
    s.line(format!("💰 Value: {}", s.fmt_amount(value)))?;
    s.line(format!("🔢 Nonce: {}", nonce))?;
    s.line(format!("⏰ Deadline: {}", deadline))?;

    s.line("\n📝 Submitting permit...")?;
    let tx_hash = s.token.permit(&signed).await?;
    let settled = s.settle(tx_hash, "Permit failed").await?;

    s.line("\n✅ Permit successful!")?;
    s.receipt_footer(&settled)?;

    let allowance = s.token.allowance(owner, spender).await?;
    s.line(format!("✅ New Allowance: {}", s.fmt_amount(allowance)))
}

/// ERC1363 `transferAndCall`.
pub async fn transfer_and_call<T: TokenApi, P: Prompt, W: Write>(
    s: &mut Session<T, P, W>,
    args: CallArgs,
) -> CommandResult<()> {
    let to = parse_address(&args.target)?;
    let amount = s.parse_amount(&args.amount)?;
    let data = call_data(args.data.as_deref())?;
    let signer = s.signer();

    s.banner("Transfer And Call")?;
    let balance = s.token.balance_of(signer).await?;
    if amount > balance {
        return Err(CommandError::Precondition(format!(
            "Insufficient balance. You have {}",
            s.fmt_amount(balance)
        )));
    }

    s.line(format!(
        "🔗 Transferring {} to {} with {} bytes of data...",
        s.fmt_amount(amount),
        short_address(to),
        data.len()
    ))?;
    let tx_hash = s.token.transfer_and_call(to, amount, data).await?;
    let settled = s.settle(tx_hash, "Transfer failed").await?;

    s.line("\n✅ Transfer successful!")?;
    s.receipt_footer(&settled)?;

    let new_balance = s.token.balance_of(signer).await?;
    s.line(format!("💰 New Balance: {}", s.fmt_amount(new_balance)))
}

/// ERC1363 `approveAndCall`.
pub async fn approve_and_call<T: TokenApi, P: Prompt, W: Write>(
    s: &mut Session<T, P, W>,
    args: CallArgs,
) -> CommandResult<()> {
    let spender = parse_address(&args.target)?;
    let amount = s.parse_amount(&args.amount)?;
    let data = call_data(args.data.as_deref())?;
    let signer = s.signer();

    s.banner("Approve And Call")?;
    s.line(format!(
        "🔗 Approving {} for {} with {} bytes of data...",
        s.fmt_amount(amount),
        short_address(spender),
        data.len()
    ))?;
    let tx_hash = s.token.approve_and_call(spender, amount, data).await?;
    let settled = s.settle(tx_hash, "Approval failed").await?;

    s.line("\n✅ Approval successful!")?;
    s.receipt_footer(&settled)?;

    let allowance = s.token.allowance(signer, spender).await?;
    s.line(format!("✅ New Allowance: {}", s.fmt_amount(allowance)))
}

/// ERC3156 `maxFlashLoan` for this token.
pub async fn flash_info<T: TokenApi, P: Prompt, W: Write>(s: &mut Session<T, P, W>) -> CommandResult<()> {
    s.banner("Flash Loan Info")?;
    let max = s.token.max_flash_loan().await?;
    s.line(format!("⚡ Max Flash Loan: {}", s.fmt_amount(max)))
}

/// ERC3156 `flashLoan`; the receiver must repay within the same transaction.
pub async fn flash_loan<T: TokenApi, P: Prompt, W: Write>(
    s: &mut Session<T, P, W>,
    args: FlashLoanArgs,
) -> CommandResult<()> {
    let receiver = parse_address(&args.receiver)?;
    let amount = s.parse_amount(&args.amount)?;
    let data = call_data(args.data.as_deref())?;

    s.banner("Flash Loan")?;
    let max = s.token.max_flash_loan().await?;
    s.line(format!("⚡ Max Flash Loan: {}", s.fmt_amount(max)))?;
    if amount > max {
        return Err(CommandError::Precondition(format!(
            "Amount exceeds maximum flash loan of {}",
            s.fmt_amount(max)
        )));
    }

    s.line(format!(
        "\n⚡ Borrowing {} into {}...",
        s.fmt_amount(amount),
        short_address(receiver)
    ))?;
    let tx_hash = s.token.flash_loan(receiver, amount, data).await?;
    let settled = s.settle(tx_hash, "Flash loan failed").await?;

    s.line("\n✅ Flash loan successful!")?;
    s.receipt_footer(&settled)
}
