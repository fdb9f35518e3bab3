use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::transaction::{Transaction, TransactionStatus};
use crate::errors::{BankingError, Result};

/// A single-sided account: one non-negative balance held by one titular.
///
/// The balance only moves through [`Account::credit`] and
/// [`Account::debit`]; both validate before mutating, so a failed call
/// leaves the balance untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Account {
    id: String,
    holder_name: String,
    balance: Decimal,
    opened_at: DateTime<Utc>,
}

impl Account {
    /// Creates a new account with a zero balance.
    pub fn new(
        id: impl Into<String>,
        holder_name: impl Into<String>,
        opened_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            holder_name: holder_name.into(),
            balance: Decimal::ZERO,
            opened_at,
        }
    }

    /// Rebuilds an account from externally persisted state, balance
    /// included. Intended for storage adapters, not business flows.
    pub fn restore(
        id: impl Into<String>,
        holder_name: impl Into<String>,
        opened_at: DateTime<Utc>,
        balance: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            holder_name: holder_name.into(),
            balance,
            opened_at,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn holder_name(&self) -> &str {
        &self.holder_name
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn opened_at(&self) -> DateTime<Utc> {
        self.opened_at
    }

    /// Adds `amount` to the balance.
    pub fn credit(&mut self, amount: Decimal) -> Result<()> {
        if amount <= Decimal::ZERO {
            return Err(BankingError::InvalidAmount(amount));
        }
        self.balance += amount;
        tracing::debug!(account = %self.id, %amount, balance = %self.balance, "credit applied");
        Ok(())
    }

    /// Subtracts `amount` from the balance, refusing to overdraw.
    pub fn debit(&mut self, amount: Decimal) -> Result<()> {
        if amount <= Decimal::ZERO {
            return Err(BankingError::InvalidAmount(amount));
        }
        if amount > self.balance {
            return Err(BankingError::InsufficientFunds {
                requested: amount,
                available: self.balance,
            });
        }
        self.balance -= amount;
        tracing::debug!(account = %self.id, %amount, balance = %self.balance, "debit applied");
        Ok(())
    }

    /// Returns the earliest date at which a from-zero replay of this
    /// account's effectuated transactions sums back to exactly zero.
    ///
    /// Only transactions belonging to this account with status
    /// effectuated take part. They are replayed in chronological order
    /// (equal timestamps keep their relative order) accumulating signed
    /// amounts from a simulated zero balance, independent of the real
    /// balance. Exact decimal arithmetic makes the zero comparison
    /// meaningful.
    pub fn earliest_zero_balance_date(
        &self,
        transactions: &[Transaction],
    ) -> Result<DateTime<Utc>> {
        let mut own: Vec<&Transaction> = transactions
            .iter()
            .filter(|tx| {
                tx.account_id() == self.id && tx.status() == TransactionStatus::Effectuated
            })
            .collect();
        if own.is_empty() {
            return Err(BankingError::NoEffectuatedTransactions(self.id.clone()));
        }
        own.sort_by_key(|tx| tx.timestamp());

        let mut simulated = Decimal::ZERO;
        for tx in own {
            simulated += tx.amount();
            if simulated == Decimal::ZERO {
                return Ok(tx.timestamp());
            }
        }
        Err(BankingError::NoZeroCrossing(self.id.clone()))
    }
}
