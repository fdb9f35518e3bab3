//! The system-wide transaction ledger and the account capability it
//! consumes.

pub mod transaction_ledger;

pub use transaction_ledger::{
    AccountResolver, EffectuationFailure, EffectuationReport, TransactionLedger,
};
