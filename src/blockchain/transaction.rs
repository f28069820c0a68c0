//! Transaction confirmation monitoring.
//!
//! # Responsibilities
//! - Poll for the receipt of a submitted transaction
//! - Branch on the receipt's success flag
//! - Wait for the configured block depth
//!
//! There is no retry or rebroadcast: a dropped transaction surfaces as a
//! confirmation timeout.

use std::future::Future;
use std::time::Duration;

use alloy::primitives::TxHash;
use tokio::time::{interval, timeout};

use crate::blockchain::client::BlockchainClient;
use crate::blockchain::types::{BlockchainError, BlockchainResult, ConfirmationStatus};
use crate::config::NetworkConfig;

/// Decide the status of a mined transaction, or `None` while more blocks are needed.
///
/// A transaction in block N has one confirmation once the head is at N.
pub fn classify_receipt(
    succeeded: bool,
    tx_block: Option<u64>,
    gas_used: u64,
    current_block: u64,
    required_confirmations: u32,
) -> Option<ConfirmationStatus> {
    if !succeeded {
        return Some(ConfirmationStatus::Failed { block_number: tx_block });
    }

    let tx_block = tx_block.unwrap_or(current_block);
    let confirmations = current_block.saturating_sub(tx_block) + 1;

    if confirmations >= required_confirmations as u64 {
        Some(ConfirmationStatus::Confirmed {
            block_number: tx_block,
            gas_used,
        })
    } else {
        None
    }
}

/// What confirmation tracking needs from a mined receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReceiptSummary {
    pub succeeded: bool,
    pub block_number: Option<u64>,
    pub gas_used: u64,
    /// Chain head observed alongside the receipt.
    pub current_block: u64,
}

/// Timing and depth for [`poll_confirmation`].
#[derive(Debug, Clone, Copy)]
pub struct ConfirmationPolicy {
    pub required_confirmations: u32,
    pub timeout: Duration,
    pub poll_interval: Duration,
}

impl ConfirmationPolicy {
    pub fn from_config(config: &NetworkConfig) -> Self {
        Self {
            required_confirmations: config.confirmation_blocks.max(1),
            timeout: Duration::from_secs(config.confirmation_timeout_secs),
            poll_interval: Duration::from_millis(config.poll_interval_ms),
        }
    }
}

/// Poll `fetch` until the receipt settles or `policy.timeout` elapses.
///
/// `fetch` yields `None` while the transaction is pending. Errors from
/// `fetch` end the wait immediately.
pub async fn poll_confirmation<F, Fut>(
    tx_hash: TxHash,
    policy: ConfirmationPolicy,
    mut fetch: F,
) -> BlockchainResult<ConfirmationStatus>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = BlockchainResult<Option<ReceiptSummary>>>,
{
    let result = timeout(policy.timeout, async {
        let mut ticker = interval(policy.poll_interval);

        loop {
            ticker.tick().await;

            let Some(receipt) = fetch().await? else {
                tracing::debug!(tx_hash = %tx_hash, "Transaction pending");
                continue;
            };

            if let Some(status) = classify_receipt(
                receipt.succeeded,
                receipt.block_number,
                receipt.gas_used,
                receipt.current_block,
                policy.required_confirmations,
            ) {
                tracing::info!(tx_hash = %tx_hash, success = status.is_success(), ?status, "Transaction settled");
                return Ok(status);
            }

            tracing::debug!(
                tx_hash = %tx_hash,
                required = policy.required_confirmations,
                "Waiting for confirmations"
            );
        }
    })
    .await;

    match result {
        Ok(status) => status,
        Err(_) => Err(BlockchainError::ConfirmationTimeout {
            tx_hash: tx_hash.to_string(),
            secs: policy.timeout.as_secs(),
        }),
    }
}

impl BlockchainClient {
    /// Wait for a transaction to be mined and confirmed.
    ///
    /// Polls every `poll_interval_ms` until `confirmation_timeout_secs` elapses.
    pub async fn wait_for_confirmation(&self, tx_hash: TxHash) -> BlockchainResult<ConfirmationStatus> {
        let policy = ConfirmationPolicy::from_config(self.config());
        let required = policy.required_confirmations;
        poll_confirmation(tx_hash, policy, move || self.receipt_summary(tx_hash, required)).await
    }

    async fn receipt_summary(
        &self,
        tx_hash: TxHash,
        required_confirmations: u32,
    ) -> BlockchainResult<Option<ReceiptSummary>> {
        let Some(receipt) = self.get_transaction_receipt(tx_hash).await? else {
            return Ok(None);
        };
        let current_block = if required_confirmations > 1 {
            self.get_block_number().await?
        } else {
            receipt.block_number.unwrap_or_default()
        };
        Ok(Some(ReceiptSummary {
            succeeded: receipt.status(),
            block_number: receipt.block_number,
            gas_used: receipt.gas_used,
            current_block,
        }))
    }
}
