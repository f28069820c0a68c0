//! Transfer history aggregation.

use std::collections::HashSet;

use alloy::primitives::{Address, TxHash, U256};
use serde::Serialize;

/// One decoded `Transfer` log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferRecord {
    pub from: Address,
    pub to: Address,
    pub value: U256,
    pub block_number: u64,
    pub log_index: u64,
    pub tx_hash: TxHash,
}

/// Filter on the indexed `from`/`to` topics. `None` matches any address.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransferQuery {
    pub from: Option<Address>,
    pub to: Option<Address>,
}

impl TransferQuery {
    pub fn sent_by(address: Address) -> Self {
        Self { from: Some(address), to: None }
    }

    pub fn received_by(address: Address) -> Self {
        Self { from: None, to: Some(address) }
    }

    pub fn matches(&self, record: &TransferRecord) -> bool {
        self.from.is_none_or(|a| a == record.from) && self.to.is_none_or(|a| a == record.to)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Sent,
    Received,
}

/// A transfer seen from the point of view of one address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    pub direction: Direction,
    pub counterparty: Address,
    pub value: U256,
    pub block_number: u64,
    pub tx_hash: TxHash,
}

/// Sent/received summary plus the newest transfers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryReport {
    pub address: Address,
    pub sent_count: usize,
    pub received_count: usize,
    pub total_sent: U256,
    pub total_received: U256,
    /// Distinct transfers involving the address.
    pub total_transfers: usize,
    /// Newest first, at most `limit` entries.
    pub entries: Vec<HistoryEntry>,
    /// Transfers not listed because of the limit.
    pub omitted: usize,
}

impl HistoryReport {
    /// Merge sent and received logs for `address`.
    ///
    /// A self-transfer counts on both sides of the summary but is listed once.
    pub fn build(
        address: Address,
        sent: Vec<TransferRecord>,
        received: Vec<TransferRecord>,
        limit: usize,
    ) -> Self {
        let total_sent = sent.iter().fold(U256::ZERO, |acc, r| acc.saturating_add(r.value));
        let total_received = received.iter().fold(U256::ZERO, |acc, r| acc.saturating_add(r.value));
        let sent_count = sent.len();
        let received_count = received.len();

        let mut seen = HashSet::new();
        let mut merged: Vec<TransferRecord> = sent
            .into_iter()
            .chain(received)
            .filter(|r| seen.insert((r.tx_hash, r.log_index)))
            .collect();
        merged.sort_by(|a, b| {
            b.block_number
                .cmp(&a.block_number)
                .then(b.log_index.cmp(&a.log_index))
        });

        let total_transfers = merged.len();
        let entries = merged
            .into_iter()
            .take(limit)
            .map(|r| {
                let direction = if r.from == address { Direction::Sent } else { Direction::Received };
                HistoryEntry {
                    direction,
                    counterparty: if direction == Direction::Sent { r.to } else { r.from },
                    value: r.value,
                    block_number: r.block_number,
                    tx_hash: r.tx_hash,
                }
            })
            .collect::<Vec<_>>();

        Self {
            address,
            sent_count,
            received_count,
            total_sent,
            total_received,
            total_transfers,
            omitted: total_transfers.saturating_sub(entries.len()),
            entries,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::B256;

    fn addr(n: u8) -> Address {
        Address::repeat_byte(n)
    }

    fn record(from: u8, to: u8, value: u64, block: u64, index: u64) -> TransferRecord {
        TransferRecord {
            from: addr(from),
            to: addr(to),
            value: U256::from(value),
            block_number: block,
            log_index: index,
            tx_hash: B256::repeat_byte((block as u8).wrapping_mul(16).wrapping_add(index as u8)),
        }
    }

    #[test]
    fn test_summary_and_ordering() {
        let me = addr(1);
        let sent = vec![record(1, 2, 10, 5, 0), record(1, 3, 5, 9, 1)];
        let received = vec![record(4, 1, 7, 7, 0)];

        let report = HistoryReport::build(me, sent, received, 20);

        assert_eq!(report.sent_count, 2);
        assert_eq!(report.received_count, 1);
        assert_eq!(report.total_sent, U256::from(15));
        assert_eq!(report.total_received, U256::from(7));
        assert_eq!(report.total_transfers, 3);
        assert_eq!(report.omitted, 0);

        let blocks: Vec<u64> = report.entries.iter().map(|e| e.block_number).collect();
        assert_eq!(blocks, vec![9, 7, 5]);
        assert_eq!(report.entries[0].direction, Direction::Sent);
        assert_eq!(report.entries[0].counterparty, addr(3));
        assert_eq!(report.entries[1].direction, Direction::Received);
        assert_eq!(report.entries[1].counterparty, addr(4));
    }

    #[test]
    fn test_limit_reports_omitted() {
        let me = addr(1);
        let sent: Vec<_> = (0..5).map(|i| record(1, 2, 1, i, 0)).collect();
        let report = HistoryReport::build(me, sent, Vec::new(), 2);
        assert_eq!(report.entries.len(), 2);
        assert_eq!(report.omitted, 3);
        assert_eq!(report.entries[0].block_number, 4);
    }

    #[test]
    fn test_self_transfer_listed_once() {
        let me = addr(1);
        let t = record(1, 1, 3, 8, 2);
        let report = HistoryReport::build(me, vec![t.clone()], vec![t], 20);
        assert_eq!(report.sent_count, 1);
        assert_eq!(report.received_count, 1);
        assert_eq!(report.total_transfers, 1);
        assert_eq!(report.entries.len(), 1);
    }

    #[test]
    fn test_query_matching() {
        let r = record(1, 2, 1, 1, 0);
        assert!(TransferQuery::sent_by(addr(1)).matches(&r));
        assert!(!TransferQuery::sent_by(addr(2)).matches(&r));
        assert!(TransferQuery::received_by(addr(2)).matches(&r));
        assert!(TransferQuery::default().matches(&r));
    }

    #[test]
    fn test_report_serializes_direction_lowercase() {
        let report = HistoryReport::build(addr(1), vec![record(1, 2, 1, 1, 0)], Vec::new(), 5);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["entries"][0]["direction"], "sent");
    }
}
