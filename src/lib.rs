//! EduMeta token command-line client library.

// Chain access
pub mod blockchain;
pub mod token;

// User-facing surface
pub mod cli;
pub mod commands;

// Cross-cutting concerns
pub mod config;
pub mod observability;

pub use commands::{CommandError, CommandResult, Session};
pub use config::CliConfig;
pub use token::{RpcToken, TokenApi};
