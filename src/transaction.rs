// src/transaction.rs
use serde::{Deserialize, Serialize};

/// Lifecycle of a submitted contract call
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionStatus {
    #[default]
    None,
    /// Waiting for the wallet to sign and broadcast
    PendingSignature,
    /// Broadcast, waiting for a receipt
    Mining,
    Success,
    /// Mined but reverted
    Fail,
    /// Never reached the chain (rejected, RPC or encoding error)
    Exception,
}

impl TransactionStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success | Self::Fail | Self::Exception)
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Fail | Self::Exception)
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(self, Self::PendingSignature | Self::Mining)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxReceipt {
    pub transaction_hash: String,
    pub block_number: Option<u64>,
    pub gas_used: Option<u64>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionState {
    pub status: TransactionStatus,
    pub error: Option<String>,
    pub receipt: Option<TxReceipt>,
    /// Set once the transaction has been broadcast
    pub transaction_hash: Option<String>,
}

impl TransactionState {
    pub fn pending_signature() -> Self {
        Self { status: TransactionStatus::PendingSignature, ..Self::default() }
    }

    pub fn mining(transaction_hash: String) -> Self {
        Self {
            status: TransactionStatus::Mining,
            transaction_hash: Some(transaction_hash),
            ..Self::default()
        }
    }

    pub fn success(receipt: TxReceipt) -> Self {
        Self {
            status: TransactionStatus::Success,
            transaction_hash: Some(receipt.transaction_hash.clone()),
            receipt: Some(receipt),
            error: None,
        }
    }

    pub fn fail(receipt: TxReceipt) -> Self {
        Self {
            status: TransactionStatus::Fail,
            transaction_hash: Some(receipt.transaction_hash.clone()),
            error: Some("transaction reverted".to_string()),
            receipt: Some(receipt),
        }
    }

    pub fn exception(error: impl Into<String>) -> Self {
        Self {
            status: TransactionStatus::Exception,
            error: Some(error.into()),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert!(!TransactionStatus::None.is_terminal());
        assert!(TransactionStatus::Mining.is_in_flight());
        assert!(TransactionStatus::Success.is_terminal());
        assert!(!TransactionStatus::Success.is_failure());
        assert!(TransactionStatus::Fail.is_failure());
        assert!(TransactionStatus::Exception.is_failure());
    }

    #[test]
    fn test_fail_keeps_receipt() {
        let receipt = TxReceipt {
            transaction_hash: "0xabc".to_string(),
            block_number: Some(7),
            gas_used: Some(21_000),
        };
        let state = TransactionState::fail(receipt.clone());
        assert_eq!(state.status, TransactionStatus::Fail);
        assert_eq!(state.receipt, Some(receipt));
        assert_eq!(state.transaction_hash.as_deref(), Some("0xabc"));
        assert!(state.error.is_some());
    }
}
