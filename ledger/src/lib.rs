//! Ledger abstraction consumed by the governance and royalty engines.
//!
//! The multi-asset balance store itself lives outside this workspace; this
//! crate owns the *contract* the engines require from it. Balances can be
//! mutated by ordinary transfers between any two calls into the core, so
//! engines never cache a balance: they either read live (ballot resolution)
//! or read through an immutable snapshot (royalty claims).

pub mod error;
pub mod ledger;

pub use error::LedgerError;
pub use ledger::{LedgerMutator, LedgerView};
