//! Royalty streams — append-only deposit logs with per-holder cursors.

use chorus_types::{HolderAddress, SnapshotId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Position of a deposit within its stream.
pub type DepositIndex = u64;

/// One royalty deposit. Appended once, never mutated or removed.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RoyaltyDeposit {
    pub index: DepositIndex,
    /// Deposited payout-token amount.
    pub amount: u128,
    /// Ledger snapshot of the reference token taken atomically with the
    /// deposit. Later balance changes cannot affect this deposit's split.
    pub snapshot: SnapshotId,
    pub depositor: HolderAddress,
}

/// The ordered deposit log for one reference token, plus each holder's
/// claim cursor.
///
/// A cursor is the number of leading deposits the holder has already been
/// paid for; holders the map has never seen are implicitly at zero.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RoyaltyStream {
    pub(crate) deposits: Vec<RoyaltyDeposit>,
    pub(crate) cursors: HashMap<HolderAddress, DepositIndex>,
}

impl RoyaltyStream {
    /// Number of deposits ever made into this stream.
    pub fn len(&self) -> u64 {
        self.deposits.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.deposits.is_empty()
    }

    /// A deposit by index.
    pub fn deposit(&self, index: DepositIndex) -> Option<&RoyaltyDeposit> {
        self.deposits.get(index as usize)
    }

    /// This holder's claim cursor (deposits already paid out).
    pub fn cursor_of(&self, holder: &HolderAddress) -> DepositIndex {
        self.cursors.get(holder).copied().unwrap_or(0)
    }
}
