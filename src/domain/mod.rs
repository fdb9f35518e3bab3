//! Domain entities: accounts, transactions, and derived statements.

pub mod account;
pub mod statement;
pub mod transaction;

pub use account::Account;
pub use statement::{Statement, StatementEntry};
pub use transaction::{Transaction, TransactionStatus};
