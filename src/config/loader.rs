//! Configuration loading.
//!
//! Layers, lowest precedence first: compiled defaults, optional TOML file,
//! environment (including a `.env` file already loaded into the process).

use std::fs;
use std::path::Path;

use crate::config::env::{apply_env_overrides, EnvLookup};
use crate::config::schema::CliConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(std::io::Error),

    #[error("Parse error: {0}")]
    Parse(toml::de::Error),

    #[error("Environment error: {0}")]
    Env(String),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

/// Parse a TOML configuration file without validating it.
pub fn read_config_file(path: &Path) -> Result<CliConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    toml::from_str(&content).map_err(ConfigError::Parse)
}

/// Layer file and environment over the defaults, skipping validation.
///
/// Used by diagnostics that must report on an incomplete setup.
pub fn load_unvalidated(path: Option<&Path>, env: EnvLookup<'_>) -> Result<CliConfig, ConfigError> {
    let mut config = match path {
        Some(path) => read_config_file(path)?,
        None => CliConfig::default(),
    };
    apply_env_overrides(&mut config, env).map_err(ConfigError::Env)?;
    Ok(config)
}

/// Load, layer and validate configuration.
pub fn load_config(path: Option<&Path>, env: EnvLookup<'_>) -> Result<CliConfig, ConfigError> {
    let config = load_unvalidated(path, env)?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    tracing::debug!(
        network = %config.network.name,
        chain_id = config.network.chain_id,
        contract = %config.token.contract_address,
        "Configuration loaded"
    );

    Ok(config)
}
