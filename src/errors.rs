use std::result::Result as StdResult;

use rust_decimal::Decimal;
use thiserror::Error;

/// Unified error type for domain, ledger, and storage layers.
#[derive(Error, Debug)]
pub enum BankingError {
    #[error("Invalid identifier: {0}")]
    InvalidId(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(Decimal),
    #[error("Account id already in use: {0}")]
    DuplicateAccountId(String),
    #[error("Transaction id already in use: {0}")]
    DuplicateTransactionId(String),
    #[error("Account not found: {0}")]
    AccountNotFound(String),
    #[error("Transaction not found: {0}")]
    TransactionNotFound(String),
    #[error("Transaction {id} is dated before the opening of account {account_id}")]
    TransactionPrecedesOpening { id: String, account_id: String },
    #[error("Insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds {
        requested: Decimal,
        available: Decimal,
    },
    #[error("No effectuated transactions for account: {0}")]
    NoEffectuatedTransactions(String),
    #[error("Simulated balance never returns to zero for account: {0}")]
    NoZeroCrossing(String),
    #[error("Persistence error: {0}")]
    StorageError(String),
}

pub type Result<T> = StdResult<T, BankingError>;

impl From<std::io::Error> for BankingError {
    fn from(err: std::io::Error) -> Self {
        BankingError::StorageError(err.to_string())
    }
}

impl From<serde_json::Error> for BankingError {
    fn from(err: serde_json::Error) -> Self {
        BankingError::StorageError(err.to_string())
    }
}

impl From<csv::Error> for BankingError {
    fn from(err: csv::Error) -> Self {
        BankingError::StorageError(err.to_string())
    }
}
