//! Command-line surface: argument parsing, prompts and output.

pub mod console;
pub mod prompt;

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use crate::commands::advanced::{CallArgs, FlashLoanArgs, PermitArgs};
use crate::commands::allowance::AllowanceArgs;
use crate::commands::approve::ApproveArgs;
use crate::commands::balance::BalanceArgs;
use crate::commands::burn::BurnArgs;
use crate::commands::history::HistoryArgs;
use crate::commands::mint::MintArgs;
use crate::commands::pause::PauseArgs;
use crate::commands::send::SendArgs;
use crate::commands::transfer_from::TransferFromArgs;

pub use console::Console;
pub use prompt::{Prompt, StdinPrompt};

#[derive(Debug, Parser)]
#[command(name = "edumeta")]
#[command(version, about = "Command-line client for the EduMeta (EDT) token", long_about = None)]
pub struct Cli {
    /// Optional TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Dotenv file to load before reading the environment
    #[arg(long, global = true, default_value = ".env")]
    pub env_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Send tokens from your account
    Send(SendArgs),
    /// Show the token balance of an address
    Balance(BalanceArgs),
    /// Show token, account and network information
    Info,
    /// Show transfer history for an address
    History(HistoryArgs),
    /// Mint new tokens (owner only)
    Mint(MintArgs),
    /// Burn tokens from your account
    Burn(BurnArgs),
    /// Approve a spender
    Approve(ApproveArgs),
    /// Look up an allowance
    Allowance(AllowanceArgs),
    /// Transfer tokens using an allowance
    TransferFrom(TransferFromArgs),
    /// Pause the contract (owner only)
    Pause(PauseArgs),
    /// Unpause the contract (owner only)
    Unpause(PauseArgs),
    /// Sign and submit an EIP-2612 permit
    Permit(PermitArgs),
    /// ERC1363 transferAndCall
    TransferAndCall(CallArgs),
    /// ERC1363 approveAndCall
    ApproveAndCall(CallArgs),
    /// Show the maximum ERC3156 flash loan
    FlashInfo,
    /// Take an ERC3156 flash loan
    FlashLoan(FlashLoanArgs),
    /// Check environment variables and connectivity
    CheckEnv,
    /// Write the dotenv file interactively
    SetupEnv,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_send_requires_amount_with_recipient() {
        let err = Cli::try_parse_from(["edumeta", "send", "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"]);
        assert!(err.is_err());

        let cli = Cli::try_parse_from(["edumeta", "send"]).unwrap();
        assert!(matches!(cli.command, Commands::Send(SendArgs { recipient: None, amount: None })));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["edumeta", "history", "--limit", "5", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::History(args) => assert_eq!(args.limit.as_deref(), Some("5")),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_permit_deadline_default() {
        let cli = Cli::try_parse_from([
            "edumeta",
            "permit",
            "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266",
            "10",
        ])
        .unwrap();
        match cli.command {
            Commands::Permit(args) => assert_eq!(args.deadline_secs, 3600),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_setup_env_takes_env_file() {
        let cli = Cli::try_parse_from(["edumeta", "setup-env", "--env-file", "sepolia.env"]).unwrap();
        assert!(matches!(cli.command, Commands::SetupEnv));
        assert_eq!(cli.env_file, PathBuf::from("sepolia.env"));
    }
}
