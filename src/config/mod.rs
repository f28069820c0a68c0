//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! defaults
//!     → loader.rs (optional TOML file)
//!     → env.rs (.env + process environment overrides)
//!     → validation.rs (semantic checks)
//!     → CliConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - All fields have defaults so a bare `.env` is enough
//! - The signing key never passes through this module
//! - Validation separates syntactic (serde) from semantic checks

pub mod env;
pub mod loader;
pub mod schema;
pub mod validation;

pub use env::{resolve_rpc_endpoint, RpcEndpoint, RpcSource};
pub use loader::{load_config, load_unvalidated, ConfigError};
pub use schema::{CliConfig, HistoryConfig, NetworkConfig, ObservabilityConfig, TokenConfig};
