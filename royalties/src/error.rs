use chorus_ledger::LedgerError;
use chorus_types::{HolderAddress, TokenId};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RoyaltyError {
    #[error("deposit of {amount} against supply {supply} is below the payout granularity")]
    InsufficientAmount { amount: u128, supply: u128 },

    #[error("token {0} has no holders to distribute to")]
    NoHolders(TokenId),

    #[error("no royalty payments were ever deposited for token {0}")]
    NoRoyaltyPayments(TokenId),

    #[error("no pending claims for {holder} on token {token}")]
    NoPendingClaims {
        token: TokenId,
        holder: HolderAddress,
    },

    #[error("amount overflow")]
    Overflow,

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}
