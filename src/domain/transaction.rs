use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Lifecycle state of a ledger entry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TransactionStatus {
    /// Scheduled; not yet applied to any balance.
    Future,
    /// Applied to the owning account's balance.
    Effectuated,
}

/// A dated, signed movement against a single account.
///
/// Positive amounts are credits, negative amounts are debits.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    id: String,
    account_id: String,
    amount: Decimal,
    timestamp: DateTime<Utc>,
    status: TransactionStatus,
}

impl Transaction {
    /// Creates a scheduled (future) transaction.
    pub fn new(
        id: impl Into<String>,
        account_id: impl Into<String>,
        amount: Decimal,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self::with_status(id, account_id, amount, timestamp, TransactionStatus::Future)
    }

    /// Creates a transaction in an explicit status, for loaders that
    /// reconstruct already-applied entries.
    pub fn with_status(
        id: impl Into<String>,
        account_id: impl Into<String>,
        amount: Decimal,
        timestamp: DateTime<Utc>,
        status: TransactionStatus,
    ) -> Self {
        Self {
            id: id.into(),
            account_id: account_id.into(),
            amount,
            timestamp,
            status,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn status(&self) -> TransactionStatus {
        self.status
    }

    pub fn is_future(&self) -> bool {
        self.status == TransactionStatus::Future
    }

    pub fn is_effectuated(&self) -> bool {
        self.status == TransactionStatus::Effectuated
    }

    /// Flips the status to effectuated. Only the ledger sweep applies
    /// transactions, so this stays crate-internal.
    pub(crate) fn mark_effectuated(&mut self) {
        self.status = TransactionStatus::Effectuated;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn new_transactions_default_to_future() {
        let when = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        let txn = Transaction::new("tx1", "001", Decimal::from(100), when);
        assert!(txn.is_future());
        assert_eq!(txn.status(), TransactionStatus::Future);
    }

    #[test]
    fn with_status_preserves_explicit_status() {
        let when = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        let txn = Transaction::with_status(
            "tx1",
            "001",
            Decimal::from(-50),
            when,
            TransactionStatus::Effectuated,
        );
        assert!(txn.is_effectuated());
    }

    #[test]
    fn mark_effectuated_transitions_status() {
        let when = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        let mut txn = Transaction::new("tx1", "001", Decimal::from(100), when);
        txn.mark_effectuated();
        assert!(txn.is_effectuated());
        assert!(!txn.is_future());
    }
}
