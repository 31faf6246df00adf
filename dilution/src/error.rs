use crate::request::RequestId;
use chorus_ballots::BallotError;
use chorus_ledger::LedgerError;
use chorus_types::TokenId;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DilutionError {
    #[error("unknown token or asset {0}")]
    InvalidAsset(TokenId),

    #[error("dilution amount must be non-zero")]
    ZeroAmount,

    #[error("supply limit reached: {supply} + {requested} exceeds ceiling {ceiling}")]
    SupplyLimitReached {
        supply: u128,
        requested: u128,
        ceiling: u128,
    },

    #[error("cooldown active for {token}: {remaining} blocks remain")]
    WaitCooldown { token: TokenId, remaining: u64 },

    #[error("dilution request {0} not found")]
    RequestNotFound(RequestId),

    #[error("dilution request {0} is already resolved")]
    AlreadyResolved(RequestId),

    #[error("amount overflow")]
    Overflow,

    #[error(transparent)]
    Ballot(#[from] BallotError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}
