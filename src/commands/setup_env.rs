//! `setup-env`: write the dotenv file interactively.
//!
//! Needs no configuration or network. The private key is checked by
//! deriving its address and is never printed back.

use std::fs;
use std::io::Write;
use std::path::Path;

use alloy::primitives::Address;

use crate::blockchain::wallet::PRIVATE_KEY_ENV_VAR;
use crate::blockchain::Wallet;
use crate::cli::{Console, Prompt};
use crate::commands::CommandResult;
use crate::config::env::{
    mask_secret, mask_url, ALCHEMY_API_KEY_ENV_VAR, CONTRACT_ADDRESS_ENV_VAR, INFURA_API_KEY_ENV_VAR,
    PUBLIC_FALLBACK_RPC_URL, RPC_URL_ENV_VARS,
};
use crate::config::schema::SEPOLIA_CHAIN_ID;
use crate::token::input::parse_address;

/// Where JSON-RPC requests will go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RpcChoice {
    /// Public endpoint, no key.
    Ankr,
    Infura { api_key: String },
    Alchemy { api_key: String },
    Custom { url: String },
}

impl RpcChoice {
    /// Dotenv entry selecting this provider.
    fn entry(&self) -> (&'static str, &str) {
        match self {
            RpcChoice::Ankr => (RPC_URL_ENV_VARS[0], PUBLIC_FALLBACK_RPC_URL),
            RpcChoice::Infura { api_key } => (INFURA_API_KEY_ENV_VAR, api_key),
            RpcChoice::Alchemy { api_key } => (ALCHEMY_API_KEY_ENV_VAR, api_key),
            RpcChoice::Custom { url } => (RPC_URL_ENV_VARS[0], url),
        }
    }

    /// Human readable, secrets masked.
    pub fn describe(&self) -> String {
        match self {
            RpcChoice::Ankr => format!("Ankr ({})", PUBLIC_FALLBACK_RPC_URL),
            RpcChoice::Infura { api_key } => format!("Infura (API key {})", mask_secret(api_key)),
            RpcChoice::Alchemy { api_key } => format!("Alchemy (API key {})", mask_secret(api_key)),
            RpcChoice::Custom { url } => mask_url(url),
        }
    }
}

/// Answers collected by the setup dialogue.
#[derive(Clone)]
pub struct EnvSetup {
    pub contract: Address,
    /// Hex without `0x`.
    pub private_key: String,
    pub account: Address,
    pub rpc: RpcChoice,
}

impl std::fmt::Debug for EnvSetup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvSetup")
            .field("contract", &self.contract)
            .field("account", &self.account)
            .field("rpc", &self.rpc.describe())
            .finish_non_exhaustive()
    }
}

impl EnvSetup {
    /// Dotenv file contents.
    pub fn render(&self) -> String {
        let (rpc_var, rpc_value) = self.rpc.entry();
        let mut out = String::new();
        out.push_str("# Written by `edumeta setup-env`. Keep this file out of version control.\n\n");
        out.push_str("# Required\n");
        out.push_str(&format!("{}={}\n", PRIVATE_KEY_ENV_VAR, self.private_key));
        out.push_str(&format!("{}={}\n", CONTRACT_ADDRESS_ENV_VAR, self.contract.to_checksum(None)));
        out.push_str(&format!("\n# RPC endpoint (account {})\n", self.account.to_checksum(None)));
        out.push_str(&format!("{}={}\n", rpc_var, rpc_value));
        out.push_str("\n# Optional overrides\n");
        out.push_str(&format!("# CHAIN_ID={}\n", SEPOLIA_CHAIN_ID));
        out.push_str("# NETWORK_NAME=Sepolia\n");
        out.push_str("# EXPLORER_URL=https://sepolia.etherscan.io\n");
        out
    }
}

/// Interpret a provider answer.
pub fn parse_provider(answer: &str) -> Option<&'static str> {
    match answer.trim().to_ascii_lowercase().as_str() {
        "" | "ankr" | "1" => Some("ankr"),
        "infura" | "2" => Some("infura"),
        "alchemy" | "3" => Some("alchemy"),
        "custom" | "4" => Some("custom"),
        _ => None,
    }
}

pub fn run<P: Prompt, W: Write>(prompt: &mut P, console: &mut Console<W>, path: &Path) -> CommandResult<()> {
    console.line("🎓 EduMeta CLI Environment Setup\n")?;

    if path.exists() {
        let message = format!("{} already exists. Do you want to overwrite it?", path.display());
        if !prompt.confirm(&message, false)? {
            console.line("❌ Setup cancelled")?;
            return Ok(());
        }
    }

    let contract = ask_contract(prompt, console)?;
    let (private_key, account) = ask_private_key(prompt, console)?;
    let rpc = ask_rpc(prompt, console)?;

    let setup = EnvSetup {
        contract,
        private_key,
        account,
        rpc,
    };
    fs::write(path, setup.render())?;
    tracing::info!(path = %path.display(), account = %setup.account, "Wrote dotenv file");

    console.line("\n✅ Environment configuration completed!")?;
    console.line(format!("📁 File: {}", path.display()))?;
    console.line("\n📋 Configuration Summary:")?;
    console.line(format!("📄 Contract: {}", setup.contract))?;
    console.line(format!("👤 Account: {}", setup.account))?;
    console.line(format!("🔗 RPC: {}", setup.rpc.describe()))?;

    console.line("\n🔒 Security Reminder:")?;
    console.line("• Keep your .env file secure and never commit it to version control")?;
    console.line("• Your private key is stored locally and should be kept confidential")?;
    console.line("• Use a dedicated account for testing purposes")?;

    console.line("\n🚀 Next: run `edumeta check-env`, then `edumeta info`")?;
    Ok(())
}

fn ask_contract<P: Prompt, W: Write>(prompt: &mut P, console: &mut Console<W>) -> CommandResult<Address> {
    loop {
        let answer = prompt.input("Enter your deployed contract address:", None)?;
        match parse_address(&answer) {
            Ok(address) if address == Address::ZERO => {
                console.line("❌ Please enter a valid contract address")?
            }
            Ok(address) => return Ok(address),
            Err(e) => console.line(format!("❌ {}", e))?,
        }
    }
}

fn ask_private_key<P: Prompt, W: Write>(
    prompt: &mut P,
    console: &mut Console<W>,
) -> CommandResult<(String, Address)> {
    loop {
        let answer = prompt.input("Enter your private key:", None)?;
        let key = answer.trim();
        let key = key.strip_prefix("0x").unwrap_or(key);
        if key.is_empty() {
            console.line("❌ Private key is required")?;
            continue;
        }
        match Wallet::from_private_key(key, SEPOLIA_CHAIN_ID) {
            Ok(wallet) => {
                console.line(format!("👤 Account: {}", wallet.address()))?;
                return Ok((key.to_string(), wallet.address()));
            }
            Err(_) => console.line("❌ Private key must be 64 hex characters")?,
        }
    }
}

fn ask_rpc<P: Prompt, W: Write>(prompt: &mut P, console: &mut Console<W>) -> CommandResult<RpcChoice> {
    let provider = loop {
        let answer = prompt.input("Choose your RPC provider [ankr, infura, alchemy, custom]:", Some("ankr"))?;
        match parse_provider(&answer) {
            Some(provider) => break provider,
            None => console.line(format!(
                "❌ Unknown provider '{}'. Choose ankr, infura, alchemy or custom",
                answer.trim()
            ))?,
        }
    };

    match provider {
        "infura" => Ok(RpcChoice::Infura {
            api_key: ask_api_key(prompt, console, "Infura")?,
        }),
        "alchemy" => Ok(RpcChoice::Alchemy {
            api_key: ask_api_key(prompt, console, "Alchemy")?,
        }),
        "custom" => loop {
            let answer = prompt.input("Enter your custom RPC URL:", None)?;
            let url = answer.trim();
            match url::Url::parse(url) {
                Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {
                    return Ok(RpcChoice::Custom { url: url.to_string() })
                }
                _ => console.line("❌ RPC URL must start with http:// or https://")?,
            }
        },
        _ => Ok(RpcChoice::Ankr),
    }
}

fn ask_api_key<P: Prompt, W: Write>(
    prompt: &mut P,
    console: &mut Console<W>,
    provider: &str,
) -> CommandResult<String> {
    loop {
        let answer = prompt.input(&format!("Enter your {} API key:", provider), None)?;
        let key = answer.trim();
        if key.is_empty() || key.chars().any(char::is_whitespace) {
            console.line(format!("❌ {} API key is required", provider))?;
            continue;
        }
        return Ok(key.to_string());
    }
}
