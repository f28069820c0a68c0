//! Environment variable layer and RPC endpoint resolution.
//!
//! # Endpoint priority
//! ```text
//! SEPOLIA_RPC_URL / RPC_URL / [network].rpc_url   (explicit)
//!     → ALCHEMY_API_KEY                            (hosted provider)
//!     → INFURA_API_KEY                             (hosted provider)
//!     → public Ankr endpoint                       (rate limited)
//! ```

use std::fmt;

use crate::config::schema::{CliConfig, NetworkConfig};

pub const CONTRACT_ADDRESS_ENV_VAR: &str = "CONTRACT_ADDRESS";
pub const RPC_URL_ENV_VARS: [&str; 2] = ["SEPOLIA_RPC_URL", "RPC_URL"];
pub const ALCHEMY_API_KEY_ENV_VAR: &str = "ALCHEMY_API_KEY";
pub const INFURA_API_KEY_ENV_VAR: &str = "INFURA_API_KEY";
pub const CHAIN_ID_ENV_VAR: &str = "CHAIN_ID";
pub const NETWORK_NAME_ENV_VAR: &str = "NETWORK_NAME";
pub const EXPLORER_URL_ENV_VAR: &str = "EXPLORER_URL";

pub const PUBLIC_FALLBACK_RPC_URL: &str = "https://rpc.ankr.com/eth_sepolia";

/// Variable lookup used by the loader, so tests can supply a fixed map.
pub type EnvLookup<'a> = &'a dyn Fn(&str) -> Option<String>;

/// Read a variable from the process environment, treating blank values as unset.
pub fn process_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Where the RPC endpoint came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RpcSource {
    Explicit,
    Alchemy,
    Infura,
    PublicFallback,
}

impl fmt::Display for RpcSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RpcSource::Explicit => write!(f, "custom RPC URL"),
            RpcSource::Alchemy => write!(f, "Alchemy"),
            RpcSource::Infura => write!(f, "Infura"),
            RpcSource::PublicFallback => write!(f, "public Ankr endpoint (limited rate)"),
        }
    }
}

/// A resolved JSON-RPC endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RpcEndpoint {
    pub url: String,
    pub source: RpcSource,
}

impl RpcEndpoint {
    /// URL safe for display: provider API keys are masked.
    pub fn masked(&self) -> String {
        mask_url(&self.url)
    }
}

/// Overlay environment variables onto a loaded configuration.
pub fn apply_env_overrides(config: &mut CliConfig, env: EnvLookup<'_>) -> Result<(), String> {
    if let Some(address) = env(CONTRACT_ADDRESS_ENV_VAR) {
        config.token.contract_address = address;
    }

    if let Some(url) = RPC_URL_ENV_VARS.iter().find_map(|key| env(key)) {
        config.network.rpc_url = Some(url);
    }

    if let Some(chain_id) = env(CHAIN_ID_ENV_VAR) {
        config.network.chain_id = chain_id
            .parse()
            .map_err(|_| format!("{} must be an integer, got '{}'", CHAIN_ID_ENV_VAR, chain_id))?;
    }

    if let Some(name) = env(NETWORK_NAME_ENV_VAR) {
        config.network.name = name;
    }

    if let Some(explorer) = env(EXPLORER_URL_ENV_VAR) {
        config.network.explorer_url = explorer;
    }

    Ok(())
}

/// Pick the RPC endpoint by priority: explicit > Alchemy > Infura > public.
pub fn resolve_rpc_endpoint(network: &NetworkConfig, env: EnvLookup<'_>) -> RpcEndpoint {
    if let Some(url) = network.rpc_url.as_deref().filter(|u| !u.trim().is_empty()) {
        return RpcEndpoint {
            url: url.to_string(),
            source: RpcSource::Explicit,
        };
    }

    if let Some(key) = env(ALCHEMY_API_KEY_ENV_VAR) {
        return RpcEndpoint {
            url: format!("https://eth-sepolia.g.alchemy.com/v2/{}", key),
            source: RpcSource::Alchemy,
        };
    }

    if let Some(key) = env(INFURA_API_KEY_ENV_VAR) {
        return RpcEndpoint {
            url: format!("https://sepolia.infura.io/v3/{}", key),
            source: RpcSource::Infura,
        };
    }

    RpcEndpoint {
        url: PUBLIC_FALLBACK_RPC_URL.to_string(),
        source: RpcSource::PublicFallback,
    }
}

/// Mask credentials in a URL: userinfo password and `/v2/<key>`, `/v3/<key>` path keys.
pub fn mask_url(raw: &str) -> String {
    let Ok(mut parsed) = url::Url::parse(raw) else {
        return raw.to_string();
    };

    if parsed.password().is_some() {
        let _ = parsed.set_password(Some("***"));
    }

    let segments: Vec<String> = parsed
        .path_segments()
        .map(|s| s.map(str::to_string).collect())
        .unwrap_or_default();

    if segments.len() >= 2 && (segments[0] == "v2" || segments[0] == "v3") && !segments[1].is_empty() {
        let mut masked = segments.clone();
        masked[1] = "***".to_string();
        parsed.set_path(&format!("/{}", masked.join("/")));
    }

    parsed.to_string()
}

/// Mask a secret for display, keeping a short prefix and suffix.
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 10 {
        return "***".to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}
