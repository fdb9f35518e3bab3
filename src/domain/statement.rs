use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One statement line: the movement and the running balance right after
/// applying it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatementEntry {
    pub timestamp: DateTime<Utc>,
    pub amount: Decimal,
    pub balance_after: Decimal,
}

/// Derived report for one account over a date range: opening balance,
/// ordered movements, closing balance. Built fresh on each request and
/// never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Statement {
    opening_balance: Decimal,
    entries: Vec<StatementEntry>,
    closing_balance: Decimal,
}

impl Statement {
    pub fn new(
        opening_balance: Decimal,
        entries: Vec<StatementEntry>,
        closing_balance: Decimal,
    ) -> Self {
        Self {
            opening_balance,
            entries,
            closing_balance,
        }
    }

    pub fn opening_balance(&self) -> Decimal {
        self.opening_balance
    }

    pub fn entries(&self) -> &[StatementEntry] {
        &self.entries
    }

    pub fn closing_balance(&self) -> Decimal {
        self.closing_balance
    }
}
