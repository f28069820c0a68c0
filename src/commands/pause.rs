//! `pause` / `unpause`: toggle the contract's pause flag (owner only).

use std::io::Write;

use clap::Args;

use crate::cli::Prompt;
use crate::commands::{CommandError, CommandResult, Session};
use crate::token::TokenApi;

#[derive(Debug, Clone, Copy, Default, Args)]
pub struct PauseArgs {
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Which way to flip the pause flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseAction {
    Pause,
    Unpause,
}

impl PauseAction {
    fn target_paused(self) -> bool {
        self == PauseAction::Pause
    }

    fn verb(self) -> &'static str {
        match self {
            PauseAction::Pause => "pause",
            PauseAction::Unpause => "unpause",
        }
    }
}

pub async fn run<T: TokenApi, P: Prompt, W: Write>(
    s: &mut Session<T, P, W>,
    action: PauseAction,
    args: PauseArgs,
) -> CommandResult<()> {
    let title = match action {
        PauseAction::Pause => "Contract Pauser (Owner Only)",
        PauseAction::Unpause => "Contract Unpauser (Owner Only)",
    };
    s.banner(title)?;
    s.ensure_owner(&format!("{} the contract", action.verb())).await?;

    let paused = s.token.paused().await?;
    if paused == action.target_paused() {
        return Err(CommandError::Precondition(
            match action {
                PauseAction::Pause => "Contract is already paused",
                PauseAction::Unpause => "Contract is not paused",
            }
            .to_string(),
        ));
    }

    match action {
        PauseAction::Pause => {
            s.line("✅ Contract is currently active\n")?;
            s.line("⚠️  Pausing stops all transfers, mints and burns until unpaused")?;
        }
        PauseAction::Unpause => {
            s.line("⏸️  Contract is currently paused\n")?;
            s.line("⚠️  Unpausing re-enables all transfers, mints and burns")?;
        }
    }

    s.assume_yes |= args.yes;
    let question = format!("Confirm {} transaction?", action.verb());
    if !s.confirm(&question)? {
        return Ok(());
    }

    let (tx_hash, failure) = match action {
        PauseAction::Pause => {
            s.line("\n⏸️  Pausing contract...")?;
            (s.token.pause().await?, "Pause failed")
        }
        PauseAction::Unpause => {
            s.line("\n▶️  Unpausing contract...")?;
            (s.token.unpause().await?, "Unpause failed")
        }
    };
    let settled = s.settle(tx_hash, failure).await?;

    s.line(match action {
        PauseAction::Pause => "\n✅ Contract paused successfully!",
        PauseAction::Unpause => "\n✅ Contract unpaused successfully!",
    })?;
    s.receipt_footer(&settled)?;

    let now_paused = s.token.paused().await?;
    s.line(format!(
        "📊 New Status: {}",
        if now_paused { "⏸️  Paused" } else { "✅ Active" }
    ))
}
