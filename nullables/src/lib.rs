//! Nullable infrastructure for deterministic testing.
//!
//! The real multi-asset ledger lives outside this workspace. Tests (and
//! simulations) swap in the in-memory [`NullLedger`], which implements both
//! ledger traits with deterministic behavior and never touches the
//! filesystem or network.

pub mod ledger;

pub use ledger::NullLedger;
