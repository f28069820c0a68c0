//! Chain-specific types and error definitions.

use thiserror::Error;

/// Chain ID type for strong typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChainId(pub u64);

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ChainId> for u64 {
    fn from(id: ChainId) -> Self {
        id.0
    }
}

/// Errors that can occur during blockchain operations.
#[derive(Debug, Error)]
pub enum BlockchainError {
    /// RPC connection or request failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// RPC request timed out.
    #[error("RPC timeout after {0} seconds")]
    Timeout(u64),

    /// Transaction was not mined within the confirmation timeout.
    #[error("Transaction {tx_hash} not confirmed after {secs} seconds")]
    ConfirmationTimeout { tx_hash: String, secs: u64 },

    /// Contract call or transaction submission rejected by the node.
    #[error("Contract error: {0}")]
    Contract(String),

    /// Invalid private key format or signing failure.
    #[error("Wallet error: {0}")]
    Wallet(String),

    /// Chain configuration mismatch.
    #[error("Chain ID mismatch: expected {expected}, got {actual}")]
    ChainMismatch { expected: u64, actual: u64 },
}

/// Result type for blockchain operations.
pub type BlockchainResult<T> = Result<T, BlockchainError>;

/// Final state of a submitted transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmationStatus {
    /// Mined successfully with the required block depth.
    Confirmed { block_number: u64, gas_used: u64 },
    /// Mined but reverted.
    Failed { block_number: Option<u64> },
}

impl ConfirmationStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, ConfirmationStatus::Confirmed { .. })
    }
}
