//! Token contract access.
//!
//! # Data Flow
//! ```text
//! user input
//!     → input.rs (address / amount / call data validation)
//!     → TokenApi (one remote call per operation)
//!     → units.rs (formatting for display)
//! ```
//!
//! `TokenApi` is the seam between command logic and the remote contract:
//! `RpcToken` talks to a node, tests substitute an in-memory double.

pub mod abi;
pub mod history;
pub mod input;
pub mod permit;
pub mod rpc;
pub mod units;

use alloy::primitives::{Address, Bytes, TxHash, B256, U256};
use alloy::signers::Signature;

use crate::blockchain::{BlockchainResult, ConfirmationStatus};

pub use history::{HistoryReport, TransferQuery, TransferRecord};
pub use input::InputError;
pub use permit::SignedPermit;
pub use rpc::RpcToken;

/// Remote token contract as seen by the signer.
///
/// Write methods return once the transaction is accepted by the node; use
/// [`wait_for_confirmation`](TokenApi::wait_for_confirmation) for the outcome.
#[allow(async_fn_in_trait)]
pub trait TokenApi {
    /// Address of the configured signer.
    fn signer_address(&self) -> Address;
    /// Address of the token contract.
    fn contract_address(&self) -> Address;
    /// Configured chain id.
    fn chain_id(&self) -> u64;

    async fn name(&self) -> BlockchainResult<String>;
    async fn symbol(&self) -> BlockchainResult<String>;
    async fn decimals(&self) -> BlockchainResult<u8>;
    async fn total_supply(&self) -> BlockchainResult<U256>;
    async fn balance_of(&self, account: Address) -> BlockchainResult<U256>;
    async fn allowance(&self, owner: Address, spender: Address) -> BlockchainResult<U256>;
    async fn owner(&self) -> BlockchainResult<Address>;
    async fn paused(&self) -> BlockchainResult<bool>;
    async fn nonces(&self, owner: Address) -> BlockchainResult<U256>;
    async fn domain_separator(&self) -> BlockchainResult<B256>;
    async fn max_flash_loan(&self) -> BlockchainResult<U256>;

    async fn transfer(&self, to: Address, amount: U256) -> BlockchainResult<TxHash>;
    async fn transfer_from(&self, from: Address, to: Address, amount: U256) -> BlockchainResult<TxHash>;
    async fn approve(&self, spender: Address, amount: U256) -> BlockchainResult<TxHash>;
    async fn mint(&self, to: Address, amount: U256) -> BlockchainResult<TxHash>;
    async fn burn(&self, amount: U256) -> BlockchainResult<TxHash>;
    async fn pause(&self) -> BlockchainResult<TxHash>;
    async fn unpause(&self) -> BlockchainResult<TxHash>;
    async fn permit(&self, permit: &SignedPermit) -> BlockchainResult<TxHash>;
    async fn transfer_and_call(&self, to: Address, amount: U256, data: Bytes) -> BlockchainResult<TxHash>;
    async fn approve_and_call(&self, spender: Address, amount: U256, data: Bytes) -> BlockchainResult<TxHash>;
    async fn flash_loan(&self, receiver: Address, amount: U256, data: Bytes) -> BlockchainResult<TxHash>;

    /// Transfer logs matching `query`, in chain order.
    async fn transfer_events(&self, query: TransferQuery) -> BlockchainResult<Vec<TransferRecord>>;

    /// Block until the transaction is mined (or the confirmation timeout hits).
    async fn wait_for_confirmation(&self, tx_hash: TxHash) -> BlockchainResult<ConfirmationStatus>;

    /// Sign a prehash with the signer's key.
    async fn sign_hash(&self, hash: B256) -> BlockchainResult<Signature>;
}
