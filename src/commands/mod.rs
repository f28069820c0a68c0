//! Per-operation commands.
//!
//! # Flow
//! ```text
//! positional args (direct) / prompts (interactive)
//!     → validation (no network yet in direct mode)
//!     → preflight reads (balance, allowance, owner, paused)
//!     → one contract write
//!     → receipt wait → success / failure message
//! ```
//!
//! Every command is generic over [`TokenApi`], [`Prompt`] and the output
//! writer so it can run against a node or an in-memory double.

pub mod advanced;
pub mod allowance;
pub mod approve;
pub mod balance;
pub mod burn;
pub mod check_env;
pub mod history;
pub mod info;
pub mod mint;
pub mod pause;
pub mod send;
pub mod setup_env;
pub mod transfer_from;

use std::fmt::Display;
use std::io::Write;

use alloy::primitives::{Address, TxHash, U256};
use thiserror::Error;

use crate::blockchain::{BlockchainError, ConfirmationStatus};
use crate::cli::{Console, Prompt};
use crate::config::{CliConfig, ConfigError};
use crate::token::input::{parse_address, parse_amount, InputError};
use crate::token::units::{format_units, short_address};
use crate::token::TokenApi;

/// Errors that abort a command.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Blockchain(#[from] BlockchainError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A pre-flight check failed; nothing was submitted.
    #[error("{0}")]
    Precondition(String),

    /// The transaction was mined but reverted.
    #[error("Transaction {tx_hash} reverted")]
    Reverted { tx_hash: TxHash },
}

pub type CommandResult<T> = Result<T, CommandError>;

/// A mined, successful transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settled {
    pub tx_hash: TxHash,
    pub block_number: u64,
    pub gas_used: u64,
}

/// Everything a command needs: the contract, configuration, input and output.
pub struct Session<T, P, W: Write> {
    pub token: T,
    pub config: CliConfig,
    pub prompt: P,
    pub console: Console<W>,
    /// Skip confirmation prompts.
    pub assume_yes: bool,
}

impl<T: TokenApi, P: Prompt, W: Write> Session<T, P, W> {
    pub fn new(token: T, config: CliConfig, prompt: P, console: Console<W>) -> Self {
        Self {
            token,
            config,
            prompt,
            console,
            assume_yes: false,
        }
    }

    pub fn line(&mut self, text: impl Display) -> CommandResult<()> {
        Ok(self.console.line(text)?)
    }

    /// `1.5 EDT`
    pub fn fmt_amount(&self, value: U256) -> String {
        format!("{} {}", format_units(value, self.config.token.decimals), self.config.token.symbol)
    }

    pub fn parse_amount(&self, text: &str) -> Result<U256, InputError> {
        parse_amount(text, self.config.token.decimals)
    }

    pub fn signer(&self) -> Address {
        self.token.signer_address()
    }

    /// Title plus who/where we are connected as.
    pub fn banner(&mut self, title: &str) -> CommandResult<()> {
        let signer = short_address(self.signer());
        let contract = short_address(self.token.contract_address());
        let network = self.config.network.name.clone();

        self.line(format!("🎓 EduMeta {}\n", title))?;
        self.line(format!("✅ Connected as: {}", signer))?;
        self.line(format!("🌐 Network: {}", network))?;
        self.line(format!("📄 Contract: {}\n", contract))
    }

    /// Prompt until a valid address is entered.
    pub fn ask_address(&mut self, message: &str) -> CommandResult<Address> {
        loop {
            let answer = self.prompt.input(message, None)?;
            match parse_address(&answer) {
                Ok(address) => return Ok(address),
                Err(e) => self.line(format!("❌ {}", e))?,
            }
        }
    }

    /// Prompt for an address, falling back to `default` on an empty answer.
    pub fn ask_address_or(&mut self, message: &str, default: Address) -> CommandResult<Address> {
        let default_text = default.to_checksum(None);
        loop {
            let answer = self.prompt.input(message, Some(&default_text))?;
            match parse_address(&answer) {
                Ok(address) => return Ok(address),
                Err(e) => self.line(format!("❌ {}", e))?,
            }
        }
    }

    /// Prompt until a valid positive amount (at most `cap`, if given) is entered.
    pub fn ask_amount(&mut self, message: &str, cap: Option<U256>) -> CommandResult<U256> {
        loop {
            let answer = self.prompt.input(message, None)?;
            match self.parse_amount(&answer) {
                Ok(amount) => match cap {
                    Some(cap) if amount > cap => {
                        let msg = format!("❌ Insufficient balance. You have {}", self.fmt_amount(cap));
                        self.line(msg)?;
                    }
                    _ => return Ok(amount),
                },
                Err(e) => self.line(format!("❌ {}", e))?,
            }
        }
    }

    /// Ask for confirmation (default "no"). Prints the cancellation notice on refusal.
    pub fn confirm(&mut self, message: &str) -> CommandResult<bool> {
        if self.assume_yes {
            return Ok(true);
        }
        let confirmed = self.prompt.confirm(message, false)?;
        if !confirmed {
            self.line("❌ Transaction cancelled")?;
        }
        Ok(confirmed)
    }

    /// Fail unless the signer owns the contract.
    pub async fn ensure_owner(&mut self, action: &str) -> CommandResult<()> {
        self.line("🔍 Checking ownership...")?;
        let owner = self.token.owner().await?;
        if owner != self.signer() {
            self.line(format!("👑 Contract owner: {}", short_address(owner)))?;
            return Err(CommandError::Precondition(format!(
                "Access denied: Only contract owner can {}",
                action
            )));
        }
        self.line("👑 You are the contract owner!\n")
    }

    /// Print the hash, wait for the receipt and branch on its status.
    ///
    /// On revert prints `❌ {failure}` and returns [`CommandError::Reverted`].
    pub async fn settle(&mut self, tx_hash: TxHash, failure: &str) -> CommandResult<Settled> {
        self.line(format!("📋 Transaction hash: {}", tx_hash))?;
        self.line("⏳ Waiting for confirmation...")?;

        match self.token.wait_for_confirmation(tx_hash).await? {
            ConfirmationStatus::Confirmed { block_number, gas_used } => Ok(Settled {
                tx_hash,
                block_number,
                gas_used,
            }),
            ConfirmationStatus::Failed { .. } => {
                self.line(format!("\n❌ {}", failure))?;
                Err(CommandError::Reverted { tx_hash })
            }
        }
    }

    /// Explorer link and receipt details for a settled transaction.
    pub fn receipt_footer(&mut self, settled: &Settled) -> CommandResult<()> {
        let url = self.config.tx_url(settled.tx_hash);
        self.line(format!("📦 Block: {} | ⛽ Gas used: {}", settled.block_number, settled.gas_used))?;
        self.line(format!("🔗 Explorer: {}", url))
    }
}

/// Hint appended to errors caused by an empty gas balance.
pub fn error_hint(error: &CommandError) -> Option<&'static str> {
    let text = error.to_string().to_lowercase();
    if text.contains("insufficient funds") {
        Some("💡 Tip: Make sure you have enough ETH for gas fees")
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gas_hint_only_for_insufficient_funds() {
        let err = CommandError::Blockchain(BlockchainError::Contract(
            "transfer: insufficient funds for gas * price + value".to_string(),
        ));
        assert!(error_hint(&err).is_some());

        let err = CommandError::Precondition("Contract is already paused".to_string());
        assert!(error_hint(&err).is_none());
    }

    #[test]
    fn test_precondition_display_is_bare_message() {
        let err = CommandError::Precondition("Insufficient balance to burn tokens".to_string());
        assert_eq!(err.to_string(), "Insufficient balance to burn tokens");
    }
}
