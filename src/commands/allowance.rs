//! `allowance`: read how much a spender may move for an owner.

use std::io::Write;

use clap::Args;

use crate::cli::Prompt;
use crate::commands::{CommandResult, Session};
use crate::token::input::parse_address;
use crate::token::units::short_address;
use crate::token::TokenApi;

#[derive(Debug, Clone, Args)]
pub struct AllowanceArgs {
    /// Token owner
    pub owner: String,
    /// Spender
    pub spender: String,
}

pub async fn run<T: TokenApi, P: Prompt, W: Write>(
    s: &mut Session<T, P, W>,
    args: AllowanceArgs,
) -> CommandResult<()> {
    let owner = parse_address(&args.owner)?;
    let spender = parse_address(&args.spender)?;

    let allowance = s.token.allowance(owner, spender).await?;
    s.line(format!("👤 Owner: {}", short_address(owner)))?;
    s.line(format!("👤 Spender: {}", short_address(spender)))?;
    s.line(format!("✅ Allowance: {}", s.fmt_amount(allowance)))
}
