use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::account::Account;
use crate::errors::{BankingError, Result};
use crate::ledger::{AccountResolver, TransactionLedger};

/// Single authority over account-id uniqueness.
///
/// Owned by the directory rather than living in process-wide state so
/// test runs stay isolated; [`AccountIdRegistry::clear`] resets it
/// explicitly.
#[derive(Debug, Default)]
pub struct AccountIdRegistry {
    used: BTreeSet<String>,
}

impl AccountIdRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserves `id`, refusing ids already handed out.
    pub fn reserve(&mut self, id: &str) -> Result<()> {
        if !self.used.insert(id.to_string()) {
            return Err(BankingError::DuplicateAccountId(id.to_string()));
        }
        Ok(())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.used.contains(id)
    }

    /// Releases every reserved id.
    pub fn clear(&mut self) {
        self.used.clear();
    }
}

/// Owns every account in the system, keyed by id.
///
/// The registry is the only duplicate check: the map stores
/// unconditionally once a reservation succeeds.
#[derive(Debug, Default)]
pub struct AccountDirectory {
    accounts: BTreeMap<String, Account>,
    registry: AccountIdRegistry,
}

impl AccountDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates and stores a new account with a zero balance.
    pub fn create_account(
        &mut self,
        id: impl Into<String>,
        holder_name: impl Into<String>,
        opened_at: DateTime<Utc>,
    ) -> Result<&Account> {
        let id = id.into();
        self.add_account(Account::new(id.clone(), holder_name, opened_at))?;
        self.account(&id)
    }

    /// Stores an already-built account, enforcing id uniqueness.
    /// Storage adapters use this to restore persisted accounts.
    pub fn add_account(&mut self, account: Account) -> Result<()> {
        if account.id().trim().is_empty() {
            return Err(BankingError::InvalidId(
                "account id must not be empty".into(),
            ));
        }
        self.registry.reserve(account.id())?;
        self.accounts.insert(account.id().to_string(), account);
        Ok(())
    }

    /// Fallible lookup by id.
    pub fn account(&self, id: &str) -> Result<&Account> {
        self.accounts
            .get(id)
            .ok_or_else(|| BankingError::AccountNotFound(id.to_string()))
    }

    /// Mutable fallible lookup by id.
    pub fn account_mut(&mut self, id: &str) -> Result<&mut Account> {
        self.accounts
            .get_mut(id)
            .ok_or_else(|| BankingError::AccountNotFound(id.to_string()))
    }

    /// All accounts in id order.
    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Balance of `id` once everything due by `as_of` has been applied.
    ///
    /// A side-effecting read: the sweep advances ledger and account
    /// state before the balance is taken. Repeating a cutoff already
    /// processed changes nothing further.
    pub fn balance(
        &mut self,
        id: &str,
        as_of: DateTime<Utc>,
        ledger: &mut TransactionLedger,
    ) -> Result<Decimal> {
        ledger.effectuate_until(as_of, self);
        Ok(self.account(id)?.balance())
    }

    /// Sum of effectuated amounts for `id` within `[start, end]`,
    /// inclusive on both ends. Read-only.
    pub fn period_total(
        &self,
        id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        ledger: &TransactionLedger,
    ) -> Decimal {
        ledger
            .find_by_period(id, start, end, true)
            .iter()
            .map(|tx| tx.amount())
            .sum()
    }

    /// Drops every account and releases their ids.
    pub fn reset(&mut self) {
        self.accounts.clear();
        self.registry.clear();
    }
}

impl AccountResolver for AccountDirectory {
    fn resolve(&self, id: &str) -> Option<&Account> {
        self.accounts.get(id)
    }

    fn resolve_mut(&mut self, id: &str) -> Option<&mut Account> {
        self.accounts.get_mut(id)
    }
}
