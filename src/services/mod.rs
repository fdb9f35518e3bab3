//! Coordinating services over the domain entities and the ledger.

pub mod account_directory;
pub mod statement_builder;

pub use account_directory::{AccountDirectory, AccountIdRegistry};
pub use statement_builder::StatementBuilder;
