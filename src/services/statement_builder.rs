use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;

use crate::domain::statement::{Statement, StatementEntry};
use crate::errors::Result;
use crate::ledger::TransactionLedger;
use crate::services::account_directory::AccountDirectory;

/// Builds immutable statements by composing the directory's balance
/// reads with the ledger's period query.
pub struct StatementBuilder;

impl StatementBuilder {
    /// Produces the statement for `account_id` over `[start, end]`.
    ///
    /// The opening balance is read as of one day before `start`, the
    /// closing balance as of `end`; both reads are side-effecting
    /// sweeps. The closing read runs before the movement query so that
    /// transactions scheduled inside the period are applied and listed.
    /// Movements come back in ledger storage order, not re-sorted here,
    /// each paired with the running balance after it.
    ///
    /// When none of the period's movements had been applied before the
    /// build, the closing balance equals the opening balance plus the
    /// movement sum. Movements already effectuated by earlier sweeps
    /// are part of the opening read's balance too, and replaying them
    /// makes the running column diverge from the real balance; the
    /// builder reports what the directory returns either way.
    pub fn build(
        directory: &mut AccountDirectory,
        ledger: &mut TransactionLedger,
        account_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Statement> {
        let opening_balance = directory.balance(account_id, start - Duration::days(1), ledger)?;
        let closing_balance = directory.balance(account_id, end, ledger)?;

        let mut running: Decimal = opening_balance;
        let entries: Vec<StatementEntry> = ledger
            .find_by_period(account_id, start, end, true)
            .iter()
            .map(|tx| {
                running += tx.amount();
                StatementEntry {
                    timestamp: tx.timestamp(),
                    amount: tx.amount(),
                    balance_after: running,
                }
            })
            .collect();

        Ok(Statement::new(opening_balance, entries, closing_balance))
    }
}
