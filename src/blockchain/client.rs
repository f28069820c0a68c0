//! Blockchain RPC client with timeout and error handling.
//!
//! # Responsibilities
//! - Connect to the resolved JSON-RPC endpoint
//! - Query chain state (chain id, block number, balances, receipts)
//! - Handle timeouts and network errors uniformly

use std::future::IntoFuture;
use std::time::Duration;

use alloy::primitives::{Address, TxHash, U256};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::rpc::types::TransactionReceipt;
use tokio::time::timeout;

use crate::blockchain::types::{BlockchainError, BlockchainResult, ChainId};
use crate::blockchain::wallet::Wallet;
use crate::config::{NetworkConfig, RpcEndpoint};

/// Blockchain RPC client wrapper.
#[derive(Clone)]
pub struct BlockchainClient {
    provider: DynProvider,
    config: NetworkConfig,
    endpoint: RpcEndpoint,
    timeout_duration: Duration,
}

impl BlockchainClient {
    /// Connect a signing client: transactions are filled and signed by `wallet`.
    ///
    /// No request is made here; the chain id is only checked on demand.
    pub async fn connect(
        config: &NetworkConfig,
        endpoint: RpcEndpoint,
        wallet: &Wallet,
    ) -> BlockchainResult<Self> {
        let url = parse_endpoint(&endpoint)?;
        let provider = ProviderBuilder::new()
            .wallet(wallet.ethereum_wallet())
            .connect_http(url)
            .erased();

        tracing::debug!(
            rpc_url = %endpoint.masked(),
            source = %endpoint.source,
            chain_id = config.chain_id,
            signer = %wallet.address(),
            "Blockchain client initialized"
        );
        Ok(Self::from_provider(provider, config, endpoint))
    }

    /// Connect a read-only client (no signer).
    pub async fn connect_read_only(
        config: &NetworkConfig,
        endpoint: RpcEndpoint,
    ) -> BlockchainResult<Self> {
        let url = parse_endpoint(&endpoint)?;
        let provider = ProviderBuilder::new().connect_http(url).erased();
        Ok(Self::from_provider(provider, config, endpoint))
    }

    fn from_provider(provider: DynProvider, config: &NetworkConfig, endpoint: RpcEndpoint) -> Self {
        Self {
            provider,
            config: config.clone(),
            endpoint,
            timeout_duration: Duration::from_secs(config.rpc_timeout_secs),
        }
    }

    /// Run one RPC request under the configured timeout.
    pub(crate) async fn request<F, T, E>(&self, op: &'static str, fut: F) -> BlockchainResult<T>
    where
        F: IntoFuture<Output = Result<T, E>>,
        E: std::fmt::Display,
    {
        self.request_as(op, fut, BlockchainError::Rpc).await
    }

    /// Like [`request`](Self::request), mapping node errors with `kind`.
    pub(crate) async fn request_as<F, T, E>(
        &self,
        op: &'static str,
        fut: F,
        kind: fn(String) -> BlockchainError,
    ) -> BlockchainResult<T>
    where
        F: IntoFuture<Output = Result<T, E>>,
        E: std::fmt::Display,
    {
        match timeout(self.timeout_duration, fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => {
                tracing::warn!(op, error = %e, "RPC error");
                Err(kind(format!("{}: {}", op, e)))
            }
            Err(_) => {
                tracing::warn!(op, "RPC timeout");
                Err(BlockchainError::Timeout(self.config.rpc_timeout_secs))
            }
        }
    }

    /// Verify the connected chain ID matches configuration.
    pub async fn verify_chain_id(&self) -> BlockchainResult<()> {
        let chain_id = self.get_chain_id().await?;
        if chain_id.0 != self.config.chain_id {
            return Err(BlockchainError::ChainMismatch {
                expected: self.config.chain_id,
                actual: chain_id.0,
            });
        }
        Ok(())
    }

    /// Get the chain ID from the RPC.
    pub async fn get_chain_id(&self) -> BlockchainResult<ChainId> {
        self.request("eth_chainId", self.provider.get_chain_id())
            .await
            .map(ChainId)
    }

    /// Get the latest block number.
    pub async fn get_block_number(&self) -> BlockchainResult<u64> {
        self.request("eth_blockNumber", self.provider.get_block_number()).await
    }

    /// Get the native balance of an address.
    pub async fn get_balance(&self, address: Address) -> BlockchainResult<U256> {
        self.request("eth_getBalance", self.provider.get_balance(address)).await
    }

    /// Get current gas price in wei.
    pub async fn get_gas_price(&self) -> BlockchainResult<u128> {
        self.request("eth_gasPrice", self.provider.get_gas_price()).await
    }

    /// Get a transaction receipt by hash.
    pub async fn get_transaction_receipt(
        &self,
        tx_hash: TxHash,
    ) -> BlockchainResult<Option<TransactionReceipt>> {
        self.request(
            "eth_getTransactionReceipt",
            self.provider.get_transaction_receipt(tx_hash),
        )
        .await
    }

    /// Get the underlying provider.
    pub fn provider(&self) -> &DynProvider {
        &self.provider
    }

    /// Get the network configuration.
    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }
}

/// Parse the endpoint URL; only the HTTP transport is wired up.
fn parse_endpoint(endpoint: &RpcEndpoint) -> BlockchainResult<url::Url> {
    let url: url::Url = endpoint.url.parse().map_err(|e| {
        BlockchainError::Rpc(format!("Invalid RPC URL '{}': {}", endpoint.masked(), e))
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(BlockchainError::Rpc(format!(
            "Invalid RPC URL '{}': unsupported scheme '{}', expected http or https",
            endpoint.masked(),
            scheme
        ))),
    }
}

impl std::fmt::Debug for BlockchainClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockchainClient")
            .field("rpc_url", &self.endpoint.masked())
            .field("chain_id", &self.config.chain_id)
            .field("timeout_secs", &self.config.rpc_timeout_secs)
            .finish()
    }
}
