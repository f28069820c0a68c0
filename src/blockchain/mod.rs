//! Blockchain integration subsystem (connection factory).
//!
//! # Data Flow
//! ```text
//! Environment Variables (private key) + resolved RPC endpoint
//!     → wallet.rs (key loading, signing)
//!     → client.rs (RPC connection with timeouts)
//!     → transaction.rs (receipt polling, confirmation)
//! ```
//!
//! # Security Constraints
//! - Private keys ONLY from environment variables
//! - Never log private keys or API keys embedded in RPC URLs
//! - All RPC calls have configurable timeouts

pub mod client;
pub mod transaction;
pub mod types;
pub mod wallet;

pub use client::BlockchainClient;
pub use types::{BlockchainError, BlockchainResult, ChainId, ConfirmationStatus};
pub use wallet::Wallet;
