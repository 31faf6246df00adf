use chorus_types::{HolderAddress, SnapshotId, TokenId};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("unknown token {0}")]
    UnknownToken(TokenId),

    #[error("unknown snapshot {0}")]
    UnknownSnapshot(SnapshotId),

    #[error("snapshot {snapshot} does not cover token {token}")]
    SnapshotTokenMismatch {
        snapshot: SnapshotId,
        token: TokenId,
    },

    #[error("insufficient balance for {holder}: have {available}, need {needed}")]
    InsufficientBalance {
        holder: HolderAddress,
        available: u128,
        needed: u128,
    },

    #[error("amount overflow")]
    Overflow,
}
