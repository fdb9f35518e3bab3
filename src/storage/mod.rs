//! Persistence adapters over the core's public state.
//!
//! These are collaborators of the engine, not part of it: they read
//! accounts and transactions through getters and rebuild them through
//! the restoring constructors. The engine never calls back into them.

pub mod csv_backend;
pub mod json_backend;

pub use json_backend::LedgerSnapshot;
