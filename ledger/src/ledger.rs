//! The two ledger capability traits.
//!
//! `LedgerView` is the read side; `LedgerMutator` adds the writes reserved
//! for authorized governance and distribution components (snapshot creation,
//! minting, escrow transfers). Engines take these as injected dependencies
//! per call and never hold a ledger across calls.

use crate::error::LedgerError;
use chorus_types::{HolderAddress, SnapshotId, TokenId};

/// Read-only view of the multi-asset ledger.
pub trait LedgerView {
    /// Whether the token exists on the ledger.
    fn token_exists(&self, token: TokenId) -> bool;

    /// Current balance of `holder` in `token`.
    ///
    /// A holder the ledger has never seen holds zero; only an unknown token
    /// is an error.
    fn balance_of(&self, holder: &HolderAddress, token: TokenId) -> Result<u128, LedgerError>;

    /// Current total supply of `token`.
    fn total_supply(&self, token: TokenId) -> Result<u128, LedgerError>;

    /// Balance of `holder` in `token` as captured by `snapshot`.
    ///
    /// Immutable once the snapshot exists: no later transfer can change the
    /// answer.
    fn balance_of_at(
        &self,
        holder: &HolderAddress,
        snapshot: SnapshotId,
        token: TokenId,
    ) -> Result<u128, LedgerError>;

    /// Total supply of `token` as captured by `snapshot`.
    fn total_supply_at(&self, snapshot: SnapshotId, token: TokenId) -> Result<u128, LedgerError>;
}

/// Mutating ledger operations reserved for authorized components.
pub trait LedgerMutator: LedgerView {
    /// Capture an immutable snapshot of `token`'s balances and total supply,
    /// returning a fresh monotonically increasing id.
    fn snapshot(&mut self, token: TokenId) -> Result<SnapshotId, LedgerError>;

    /// Mint `amount` of `token` into `to`'s balance.
    fn mint(&mut self, token: TokenId, amount: u128, to: &HolderAddress)
        -> Result<(), LedgerError>;

    /// Move `amount` of `token` from `from` to `to`.
    fn transfer(
        &mut self,
        token: TokenId,
        from: &HolderAddress,
        to: &HolderAddress,
        amount: u128,
    ) -> Result<(), LedgerError>;
}
