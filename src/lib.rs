#![doc(test(attr(deny(warnings))))]

//! Banking Core offers the ledger and balance primitives that power
//! account management workflows: accounts with non-negative balances,
//! a system-wide transaction ledger with scheduled/applied states, and
//! statement generation over date ranges.

pub mod domain;
pub mod errors;
pub mod ledger;
pub mod services;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Banking Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
