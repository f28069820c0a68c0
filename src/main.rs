//! EduMeta token CLI.
//!
//! # Architecture Overview
//!
//! ```text
//!   argv ──▶ clap ──▶ dotenv + config ──▶ wallet ──▶ BlockchainClient
//!                                                        │
//!                                                        ▼
//!   stdout ◀── Console ◀── command ◀── Session ◀── RpcToken (TokenApi)
//!                              ▲
//!                              └── Prompt (interactive mode only)
//! ```
//!
//! Every subcommand runs in one of two modes: direct (all arguments given,
//! validated before any network call) or interactive (prompts for what is
//! missing and asks for confirmation before submitting).

use std::process::ExitCode;

use clap::Parser;

use edumeta_cli::blockchain::{BlockchainClient, Wallet};
use edumeta_cli::cli::{Cli, Commands, Console, StdinPrompt};
use edumeta_cli::commands::pause::PauseAction;
use edumeta_cli::commands::{self, error_hint, CommandError, CommandResult, Session};
use edumeta_cli::config::env::process_env;
use edumeta_cli::config::{load_config, load_unvalidated, resolve_rpc_endpoint, ObservabilityConfig};
use edumeta_cli::observability::init_logging;
use edumeta_cli::token::input::parse_address;
use edumeta_cli::token::RpcToken;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(CommandError::Reverted { tx_hash }) => {
            tracing::error!(%tx_hash, "Transaction reverted");
            ExitCode::FAILURE
        }
        Err(CommandError::Precondition(message)) => {
            println!("❌ {}", message);
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("\n❌ Error: {}", e);
            if let Some(hint) = error_hint(&e) {
                eprintln!("{}", hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> CommandResult<()> {
    if let Commands::SetupEnv = cli.command {
        init_logging(&ObservabilityConfig::default().log_level, cli.verbose);
        let mut console = Console::stdout();
        let result = commands::setup_env::run(&mut StdinPrompt, &mut console, &cli.env_file);
        console.flush()?;
        return result;
    }

    let dotenv = dotenvy::from_path(&cli.env_file);
    let env = &process_env;

    if let Commands::CheckEnv = cli.command {
        let config = load_unvalidated(cli.config.as_deref(), env)?;
        init_logging(&config.observability.log_level, cli.verbose);
        log_dotenv(&cli, &dotenv);
        let mut console = Console::stdout();
        return commands::check_env::run(&mut console, &config, env).await;
    }

    let config = load_config(cli.config.as_deref(), env)?;
    init_logging(&config.observability.log_level, cli.verbose);
    log_dotenv(&cli, &dotenv);

    let endpoint = resolve_rpc_endpoint(&config.network, env);
    tracing::info!(rpc_url = %endpoint.masked(), source = %endpoint.source, "Using RPC endpoint");

    let wallet = Wallet::from_env(config.network.chain_id)?;
    let client = BlockchainClient::connect(&config.network, endpoint.clone(), &wallet).await?;
    let contract = parse_address(&config.token.contract_address)?;
    let token = RpcToken::new(client, wallet, contract, config.history.from_block);

    let mut session = Session::new(token, config, StdinPrompt, Console::stdout());
    let s = &mut session;

    let result = match cli.command {
        Commands::Send(args) => commands::send::run(s, args).await,
        Commands::Balance(args) => commands::balance::run(s, args).await,
        Commands::Info => commands::info::run(s, &endpoint).await,
        Commands::History(args) => commands::history::run(s, args).await,
        Commands::Mint(args) => commands::mint::run(s, args).await,
        Commands::Burn(args) => commands::burn::run(s, args).await,
        Commands::Approve(args) => commands::approve::run(s, args).await,
        Commands::Allowance(args) => commands::allowance::run(s, args).await,
        Commands::TransferFrom(args) => commands::transfer_from::run(s, args).await,
        Commands::Pause(args) => commands::pause::run(s, PauseAction::Pause, args).await,
        Commands::Unpause(args) => commands::pause::run(s, PauseAction::Unpause, args).await,
        Commands::Permit(args) => commands::advanced::permit(s, args).await,
        Commands::TransferAndCall(args) => commands::advanced::transfer_and_call(s, args).await,
        Commands::ApproveAndCall(args) => commands::advanced::approve_and_call(s, args).await,
        Commands::FlashInfo => commands::advanced::flash_info(s).await,
        Commands::FlashLoan(args) => commands::advanced::flash_loan(s, args).await,
        Commands::CheckEnv | Commands::SetupEnv => Ok(()),
    };

    session.console.flush()?;
    result
}

fn log_dotenv(cli: &Cli, result: &dotenvy::Result<()>) {
    match result {
        Ok(()) => tracing::debug!(path = %cli.env_file.display(), "Loaded dotenv file"),
        Err(e) if e.not_found() => {
            tracing::debug!(path = %cli.env_file.display(), "No dotenv file, using process environment")
        }
        Err(e) => tracing::warn!(path = %cli.env_file.display(), error = %e, "Failed to load dotenv file"),
    }
}
