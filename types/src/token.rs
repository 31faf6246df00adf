//! Token and snapshot identifiers.
//!
//! The ledger is multi-asset: every fungible token (a track's share token,
//! the platform payout currency) has its own `TokenId`. Snapshot ids are
//! issued by the ledger's monotonic generator and identify an immutable
//! point-in-time record of one token's balances.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a fungible token on the multi-asset ledger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TokenId(u64);

impl TokenId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "token:{}", self.0)
    }
}

/// Identifier of an immutable balance snapshot, issued by the ledger.
///
/// Ids are monotonically increasing across the whole ledger, so a later
/// snapshot always has a larger id than an earlier one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SnapshotId(u64);

impl SnapshotId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SnapshotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "snap:{}", self.0)
    }
}
