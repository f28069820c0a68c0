//! `TokenApi` over JSON-RPC.

use alloy::primitives::{Address, Bytes, TxHash, B256, U256};
use alloy::providers::{DynProvider, PendingTransactionBuilder, Provider};
use alloy::rpc::types::eth::Filter;
use alloy::signers::Signature;
use alloy::sol_types::SolEvent;
use tokio::sync::OnceCell;

use crate::blockchain::{BlockchainClient, BlockchainError, BlockchainResult, ConfirmationStatus, Wallet};
use crate::token::abi::IEduMeta;
use crate::token::history::{TransferQuery, TransferRecord};
use crate::token::permit::SignedPermit;
use crate::token::TokenApi;

/// Contract proxy bound to a fixed address, signing with the configured wallet.
pub struct RpcToken {
    client: BlockchainClient,
    wallet: Wallet,
    contract: IEduMeta::IEduMetaInstance<DynProvider>,
    from_block: u64,
    chain_checked: OnceCell<()>,
}

impl RpcToken {
    pub fn new(client: BlockchainClient, wallet: Wallet, address: Address, from_block: u64) -> Self {
        let contract = IEduMeta::new(address, client.provider().clone());
        Self {
            client,
            wallet,
            contract,
            from_block,
            chain_checked: OnceCell::new(),
        }
    }

    /// Warn (once) before the first transaction if the node is on another chain.
    async fn check_chain_once(&self) {
        self.chain_checked
            .get_or_init(|| async {
                if let Err(e) = self.client.verify_chain_id().await {
                    tracing::warn!(error = %e, "Chain verification failed");
                }
            })
            .await;
    }

    fn submitted(&self, op: &'static str, pending: PendingTransactionBuilder<alloy::network::Ethereum>) -> TxHash {
        let tx_hash = *pending.tx_hash();
        tracing::info!(op, tx_hash = %tx_hash, contract = %self.contract.address(), "Transaction submitted");
        tx_hash
    }
}

impl TokenApi for RpcToken {
    fn signer_address(&self) -> Address {
        self.wallet.address()
    }

    fn contract_address(&self) -> Address {
        *self.contract.address()
    }

    fn chain_id(&self) -> u64 {
        self.client.config().chain_id
    }

    async fn name(&self) -> BlockchainResult<String> {
        self.client
            .request_as("name", self.contract.name().call(), BlockchainError::Contract)
            .await
    }

    async fn symbol(&self) -> BlockchainResult<String> {
        self.client
            .request_as("symbol", self.contract.symbol().call(), BlockchainError::Contract)
            .await
    }

    async fn decimals(&self) -> BlockchainResult<u8> {
        self.client
            .request_as("decimals", self.contract.decimals().call(), BlockchainError::Contract)
            .await
    }

    async fn total_supply(&self) -> BlockchainResult<U256> {
        self.client
            .request_as("totalSupply", self.contract.totalSupply().call(), BlockchainError::Contract)
            .await
    }

    async fn balance_of(&self, account: Address) -> BlockchainResult<U256> {
        self.client
            .request_as("balanceOf", self.contract.balanceOf(account).call(), BlockchainError::Contract)
            .await
    }

    async fn allowance(&self, owner: Address, spender: Address) -> BlockchainResult<U256> {
        self.client
            .request_as(
                "allowance",
                self.contract.allowance(owner, spender).call(),
                BlockchainError::Contract,
            )
            .await
    }

    async fn owner(&self) -> BlockchainResult<Address> {
        self.client
            .request_as("owner", self.contract.owner().call(), BlockchainError::Contract)
            .await
    }

    async fn paused(&self) -> BlockchainResult<bool> {
        self.client
            .request_as("paused", self.contract.paused().call(), BlockchainError::Contract)
            .await
    }

    async fn nonces(&self, owner: Address) -> BlockchainResult<U256> {
        self.client
            .request_as("nonces", self.contract.nonces(owner).call(), BlockchainError::Contract)
            .await
    }

    async fn domain_separator(&self) -> BlockchainResult<B256> {
        self.client
            .request_as(
                "DOMAIN_SEPARATOR",
                self.contract.DOMAIN_SEPARATOR().call(),
                BlockchainError::Contract,
            )
            .await
    }

    async fn max_flash_loan(&self) -> BlockchainResult<U256> {
        let token = *self.contract.address();
        self.client
            .request_as(
                "maxFlashLoan",
                self.contract.maxFlashLoan(token).call(),
                BlockchainError::Contract,
            )
            .await
    }

    async fn transfer(&self, to: Address, amount: U256) -> BlockchainResult<TxHash> {
        self.check_chain_once().await;
        let pending = self
            .client
            .request_as("transfer", self.contract.transfer(to, amount).send(), BlockchainError::Contract)
            .await?;
        Ok(self.submitted("transfer", pending))
    }

    async fn transfer_from(&self, from: Address, to: Address, amount: U256) -> BlockchainResult<TxHash> {
        self.check_chain_once().await;
        let pending = self
            .client
            .request_as(
                "transferFrom",
                self.contract.transferFrom(from, to, amount).send(),
                BlockchainError::Contract,
            )
            .await?;
        Ok(self.submitted("transferFrom", pending))
    }

    async fn approve(&self, spender: Address, amount: U256) -> BlockchainResult<TxHash> {
        self.check_chain_once().await;
        let pending = self
            .client
            .request_as("approve", self.contract.approve(spender, amount).send(), BlockchainError::Contract)
            .await?;
        Ok(self.submitted("approve", pending))
    }

    async fn mint(&self, to: Address, amount: U256) -> BlockchainResult<TxHash> {
        self.check_chain_once().await;
        let pending = self
            .client
            .request_as("mint", self.contract.mint(to, amount).send(), BlockchainError::Contract)
            .await?;
        Ok(self.submitted("mint", pending))
    }

    async fn burn(&self, amount: U256) -> BlockchainResult<TxHash> {
        self.check_chain_once().await;
        let pending = self
            .client
            .request_as("burn", self.contract.burn(amount).send(), BlockchainError::Contract)
            .await?;
        Ok(self.submitted("burn", pending))
    }

    async fn pause(&self) -> BlockchainResult<TxHash> {
        self.check_chain_once().await;
        let pending = self
            .client
            .request_as("pause", self.contract.pause().send(), BlockchainError::Contract)
            .await?;
        Ok(self.submitted("pause", pending))
    }

    async fn unpause(&self) -> BlockchainResult<TxHash> {
        self.check_chain_once().await;
        let pending = self
            .client
            .request_as("unpause", self.contract.unpause().send(), BlockchainError::Contract)
            .await?;
        Ok(self.submitted("unpause", pending))
    }

    async fn permit(&self, permit: &SignedPermit) -> BlockchainResult<TxHash> {
        self.check_chain_once().await;
        let call = self.contract.permit(
            permit.owner,
            permit.spender,
            permit.value,
            permit.deadline,
            permit.v,
            permit.r,
            permit.s,
        );
        let pending = self
            .client
            .request_as("permit", call.send(), BlockchainError::Contract)
            .await?;
        Ok(self.submitted("permit", pending))
    }

    async fn transfer_and_call(&self, to: Address, amount: U256, data: Bytes) -> BlockchainResult<TxHash> {
        self.check_chain_once().await;
        let pending = self
            .client
            .request_as(
                "transferAndCall",
                self.contract.transferAndCall(to, amount, data).send(),
                BlockchainError::Contract,
            )
            .await?;
        Ok(self.submitted("transferAndCall", pending))
    }

    async fn approve_and_call(&self, spender: Address, amount: U256, data: Bytes) -> BlockchainResult<TxHash> {
        self.check_chain_once().await;
        let pending = self
            .client
            .request_as(
                "approveAndCall",
                self.contract.approveAndCall(spender, amount, data).send(),
                BlockchainError::Contract,
            )
            .await?;
        Ok(self.submitted("approveAndCall", pending))
    }

    async fn flash_loan(&self, receiver: Address, amount: U256, data: Bytes) -> BlockchainResult<TxHash> {
        self.check_chain_once().await;
        let token = *self.contract.address();
        let pending = self
            .client
            .request_as(
                "flashLoan",
                self.contract.flashLoan(receiver, token, amount, data).send(),
                BlockchainError::Contract,
            )
            .await?;
        Ok(self.submitted("flashLoan", pending))
    }

    async fn transfer_events(&self, query: TransferQuery) -> BlockchainResult<Vec<TransferRecord>> {
        let mut filter = Filter::new()
            .address(*self.contract.address())
            .from_block(self.from_block)
            .event(IEduMeta::Transfer::SIGNATURE);
        if let Some(from) = query.from {
            filter = filter.topic1(from.into_word());
        }
        if let Some(to) = query.to {
            filter = filter.topic2(to.into_word());
        }

        let logs = self
            .client
            .request("eth_getLogs", self.client.provider().get_logs(&filter))
            .await?;

        let mut records = Vec::with_capacity(logs.len());
        for log in logs {
            let decoded = match log.log_decode::<IEduMeta::Transfer>() {
                Ok(decoded) => decoded,
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping undecodable Transfer log");
                    continue;
                }
            };
            let event = decoded.inner.data;
            records.push(TransferRecord {
                from: event.from,
                to: event.to,
                value: event.value,
                block_number: log.block_number.unwrap_or_default(),
                log_index: log.log_index.unwrap_or_default(),
                tx_hash: log.transaction_hash.unwrap_or_default(),
            });
        }

        tracing::debug!(?query, count = records.len(), "Fetched Transfer events");
        Ok(records)
    }

    async fn wait_for_confirmation(&self, tx_hash: TxHash) -> BlockchainResult<ConfirmationStatus> {
        self.client.wait_for_confirmation(tx_hash).await
    }

    async fn sign_hash(&self, hash: B256) -> BlockchainResult<Signature> {
        self.wallet.sign_hash(hash).await
    }
}
