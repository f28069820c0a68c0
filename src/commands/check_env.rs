//! `check-env`: report configuration and test connectivity.
//!
//! Runs before a signer exists, so it works on an incomplete `.env` and
//! never prints the private key in full.

use std::io::Write;

use alloy::primitives::U256;

use crate::blockchain::wallet::PRIVATE_KEY_ENV_VAR;
use crate::blockchain::{BlockchainClient, Wallet};
use crate::cli::Console;
use crate::commands::{CommandError, CommandResult};
use crate::config::env::{
    mask_secret, mask_url, EnvLookup, ALCHEMY_API_KEY_ENV_VAR, CHAIN_ID_ENV_VAR, CONTRACT_ADDRESS_ENV_VAR,
    EXPLORER_URL_ENV_VAR, INFURA_API_KEY_ENV_VAR, NETWORK_NAME_ENV_VAR, RPC_URL_ENV_VARS,
};
use crate::config::validation::{validate_config, ValidationError};
use crate::config::{resolve_rpc_endpoint, CliConfig};
use crate::token::units::format_units;

/// One environment variable as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvVarStatus {
    pub name: &'static str,
    pub required: bool,
    /// Masked value, `None` when unset.
    pub display: Option<String>,
}

impl EnvVarStatus {
    fn render(&self) -> String {
        match (&self.display, self.required) {
            (Some(value), _) => format!("✅ {}: {}", self.name, value),
            (None, true) => format!("❌ {}: not set (required)", self.name),
            (None, false) => format!("⚪ {}: not set", self.name),
        }
    }
}

fn masked_value(name: &str, value: &str) -> String {
    if name == PRIVATE_KEY_ENV_VAR || name.ends_with("_API_KEY") {
        mask_secret(value)
    } else if name.ends_with("_URL") {
        mask_url(value)
    } else {
        value.to_string()
    }
}

/// Required and optional variables with secrets masked.
pub fn inspect_env(env: EnvLookup<'_>) -> Vec<EnvVarStatus> {
    let required = [PRIVATE_KEY_ENV_VAR, CONTRACT_ADDRESS_ENV_VAR].map(|name| (name, true));
    let optional = [
        RPC_URL_ENV_VARS[0],
        RPC_URL_ENV_VARS[1],
        ALCHEMY_API_KEY_ENV_VAR,
        INFURA_API_KEY_ENV_VAR,
        CHAIN_ID_ENV_VAR,
        NETWORK_NAME_ENV_VAR,
        EXPLORER_URL_ENV_VAR,
    ]
    .map(|name| (name, false));

    required
        .into_iter()
        .chain(optional)
        .map(|(name, required)| EnvVarStatus {
            name,
            required,
            display: env(name).map(|value| masked_value(name, &value)),
        })
        .collect()
}

/// Env variable a validation field is read from, if it is a required one.
fn required_source(field: &str) -> Option<&'static str> {
    match field {
        "token.contract_address" => Some(CONTRACT_ADDRESS_ENV_VAR),
        _ => None,
    }
}

/// Count missing required variables and validation errors, once per cause.
pub fn count_setup_problems(statuses: &[EnvVarStatus], errors: &[ValidationError]) -> usize {
    let missing: Vec<&str> = statuses
        .iter()
        .filter(|s| s.required && s.display.is_none())
        .map(|s| s.name)
        .collect();
    let unexplained = errors
        .iter()
        .filter(|e| required_source(e.field).map_or(true, |name| !missing.contains(&name)))
        .count();
    missing.len() + unexplained
}

pub async fn run<W: Write>(
    console: &mut Console<W>,
    config: &CliConfig,
    env: EnvLookup<'_>,
) -> CommandResult<()> {
    console.line("🎓 EduMeta Environment Check\n")?;
    console.line("📋 Environment Variables:")?;
    let statuses = inspect_env(env);
    for status in &statuses {
        console.line(format!("   {}", status.render()))?;
    }

    let errors = validate_config(config).err().unwrap_or_default();
    if !errors.is_empty() {
        console.line("\n⚠️  Configuration problems:")?;
        for error in &errors {
            console.line(format!("   ❌ {}", error))?;
        }
    }
    let mut problems = count_setup_problems(&statuses, &errors);

    let endpoint = resolve_rpc_endpoint(&config.network, env);
    console.line("\n🌐 Network:")?;
    console.line(format!("   Name: {} (chain {})", config.network.name, config.network.chain_id))?;
    console.line(format!("   RPC: {}", endpoint.masked()))?;
    console.line(format!("   Source: {}", endpoint.source))?;
    console.line(format!("   Explorer: {}", config.network.explorer_url))?;

    console.line("\n🔗 Connectivity:")?;
    let client = BlockchainClient::connect_read_only(&config.network, endpoint).await?;

    match client.get_chain_id().await {
        Ok(actual) if actual.0 == config.network.chain_id => {
            console.line(format!("   ✅ Chain ID: {}", actual.0))?;
        }
        Ok(actual) => {
            problems += 1;
            console.line(format!(
                "   ❌ Chain ID: {} (expected {})",
                actual.0, config.network.chain_id
            ))?;
        }
        Err(e) => {
            problems += 1;
            console.line(format!("   ❌ RPC unreachable: {}", e))?;
        }
    }

    if let Some(key) = env(PRIVATE_KEY_ENV_VAR) {
        match Wallet::from_private_key(&key, config.network.chain_id) {
            Ok(wallet) => {
                console.line(format!("   👤 Account: {}", wallet.address()))?;
                match client.get_balance(wallet.address()).await {
                    Ok(balance) => {
                        console.line(format!("   💰 ETH Balance: {} ETH", format_units(balance, 18)))?;
                        if balance.is_zero() {
                            console.line("   ⚠️  No ETH for gas fees")?;
                        }
                    }
                    Err(e) => console.line(format!("   ❌ Balance unavailable: {}", e))?,
                }
            }
            Err(e) => {
                problems += 1;
                console.line(format!("   ❌ {}", e))?;
            }
        }
    }

    match client.get_gas_price().await {
        Ok(wei) => console.line(format!("   ⛽ Gas Price: {} gwei", format_units(U256::from(wei), 9)))?,
        Err(e) => console.line(format!("   ❌ Gas price unavailable: {}", e))?,
    }

    if problems > 0 {
        return Err(CommandError::Precondition(format!(
            "Environment check found {} problem(s)",
            problems
        )));
    }
    console.line("\n✅ Environment looks good!")?;
    Ok(())
}
