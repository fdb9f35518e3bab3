use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::account::Account;
use crate::domain::transaction::Transaction;
use crate::errors::{BankingError, Result};

/// Capability to reach accounts by id.
///
/// Implemented by whatever owns the account map and supplied to each
/// ledger operation that needs it; the ledger itself never holds
/// accounts, so account existence has a single source of truth.
pub trait AccountResolver {
    fn resolve(&self, id: &str) -> Option<&Account>;
    fn resolve_mut(&mut self, id: &str) -> Option<&mut Account>;
}

/// Outcome of an effectuation sweep.
#[derive(Debug, Default)]
pub struct EffectuationReport {
    /// Number of transactions applied by this sweep.
    pub effectuated: usize,
    /// Due transactions the sweep could not apply; they stay scheduled.
    pub failures: Vec<EffectuationFailure>,
}

impl EffectuationReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// A due transaction the sweep skipped, with the reason.
#[derive(Debug)]
pub struct EffectuationFailure {
    pub transaction_id: String,
    pub error: BankingError,
}

/// Insertion-ordered collection of every transaction across all
/// accounts.
#[derive(Debug, Default)]
pub struct TransactionLedger {
    transactions: Vec<Transaction>,
}

impl TransactionLedger {
    pub fn new() -> Self {
        Self {
            transactions: Vec::new(),
        }
    }

    /// Validates and appends a transaction, status as constructed.
    ///
    /// Ids are unique across the whole ledger, not per account, and the
    /// transaction may not predate the owning account's opening.
    pub fn add(&mut self, tx: Transaction, accounts: &impl AccountResolver) -> Result<()> {
        if tx.id().trim().is_empty() {
            return Err(BankingError::InvalidId(
                "transaction id must not be empty".into(),
            ));
        }
        if tx.amount() == Decimal::ZERO {
            return Err(BankingError::InvalidAmount(tx.amount()));
        }
        if self
            .transactions
            .iter()
            .any(|existing| existing.id() == tx.id())
        {
            return Err(BankingError::DuplicateTransactionId(tx.id().to_string()));
        }
        let account = accounts
            .resolve(tx.account_id())
            .ok_or_else(|| BankingError::AccountNotFound(tx.account_id().to_string()))?;
        if tx.timestamp() < account.opened_at() {
            return Err(BankingError::TransactionPrecedesOpening {
                id: tx.id().to_string(),
                account_id: tx.account_id().to_string(),
            });
        }
        self.transactions.push(tx);
        Ok(())
    }

    /// Removes a transaction, returning the removed instance.
    ///
    /// An effectuated transaction has its balance effect reversed first:
    /// a prior credit is debited back, a prior debit credited back. The
    /// reversal and the deletion form one unit: if the reversal fails
    /// the transaction stays in the ledger, unmodified.
    pub fn remove(&mut self, tx_id: &str, accounts: &mut impl AccountResolver) -> Result<Transaction> {
        let position = self
            .transactions
            .iter()
            .position(|tx| tx.id() == tx_id)
            .ok_or_else(|| BankingError::TransactionNotFound(tx_id.to_string()))?;

        if self.transactions[position].is_effectuated() {
            let account_id = self.transactions[position].account_id().to_string();
            let amount = self.transactions[position].amount();
            let account = accounts
                .resolve_mut(&account_id)
                .ok_or_else(|| BankingError::AccountNotFound(account_id.clone()))?;
            if amount > Decimal::ZERO {
                account.debit(amount)?;
            } else {
                account.credit(-amount)?;
            }
        }
        Ok(self.transactions.remove(position))
    }

    /// All transactions of `account_id` dated within `[start, end]`,
    /// inclusive on both ends, in storage order. Callers that need
    /// chronological order must sort.
    pub fn find_by_period(
        &self,
        account_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        effectuated_only: bool,
    ) -> Vec<&Transaction> {
        self.transactions
            .iter()
            .filter(|tx| tx.account_id() == account_id)
            .filter(|tx| tx.timestamp() >= start && tx.timestamp() <= end)
            .filter(|tx| !effectuated_only || tx.is_effectuated())
            .collect()
    }

    /// Applies every future transaction dated at or before `cutoff`.
    ///
    /// Due transactions are applied in chronological order, equal
    /// timestamps keeping insertion order, so a credit due earlier in
    /// the sweep funds a later debit regardless of how they were
    /// inserted. One transaction failing never stops the sweep: the
    /// failure is recorded in the report, logged at warn level, and the
    /// transaction stays scheduled. Re-running with the same cutoff is
    /// idempotent.
    pub fn effectuate_until(
        &mut self,
        cutoff: DateTime<Utc>,
        accounts: &mut impl AccountResolver,
    ) -> EffectuationReport {
        let mut due: Vec<usize> = self
            .transactions
            .iter()
            .enumerate()
            .filter(|(_, tx)| tx.is_future() && tx.timestamp() <= cutoff)
            .map(|(index, _)| index)
            .collect();
        due.sort_by_key(|&index| self.transactions[index].timestamp());

        let mut report = EffectuationReport::default();
        for index in due {
            let account_id = self.transactions[index].account_id().to_string();
            let amount = self.transactions[index].amount();
            let applied = match accounts.resolve_mut(&account_id) {
                Some(account) => {
                    if amount > Decimal::ZERO {
                        account.credit(amount)
                    } else {
                        account.debit(-amount)
                    }
                }
                None => Err(BankingError::AccountNotFound(account_id.clone())),
            };
            match applied {
                Ok(()) => {
                    self.transactions[index].mark_effectuated();
                    report.effectuated += 1;
                }
                Err(error) => {
                    let transaction_id = self.transactions[index].id().to_string();
                    tracing::warn!(
                        transaction = %transaction_id,
                        account = %account_id,
                        %error,
                        "skipping due transaction"
                    );
                    report.failures.push(EffectuationFailure {
                        transaction_id,
                        error,
                    });
                }
            }
        }
        report
    }

    pub fn transaction(&self, tx_id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|tx| tx.id() == tx_id)
    }

    /// Snapshot of the ledger contents in storage order.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Replaces the ledger contents wholesale. Intended for storage
    /// adapters restoring persisted state.
    pub fn restore(&mut self, transactions: Vec<Transaction>) {
        self.transactions = transactions;
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}
