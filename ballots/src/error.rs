use crate::ballot::BallotId;
use chorus_ledger::LedgerError;
use chorus_types::{BlockHeight, HolderAddress, TokenId};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BallotError {
    #[error("ballot {0} not found")]
    BallotNotFound(BallotId),

    #[error("token {0} does not exist on the ledger")]
    InvalidToken(TokenId),

    #[error("holder {0} has already voted on this ballot")]
    AlreadyVoted(HolderAddress),

    #[error("the ballot owner may not vote on this ballot")]
    OwnerCannotVote,

    #[error("the ballot owner may not counter-offer their own ballot")]
    OwnerCannotOffer,

    #[error("only the ballot owner may perform this action")]
    OnlyBallotOwner,

    #[error("voting window has closed for ballot {0}")]
    VotingClosed(BallotId),

    #[error("voting is not over for ballot {id}: deadline {deadline}, now {now}")]
    VotingNotOver {
        id: BallotId,
        deadline: BlockHeight,
        now: BlockHeight,
    },

    #[error("ballot {0} is already resolved")]
    AlreadyResolved(BallotId),

    #[error("a counter-offer already exists for ballot {0}")]
    AlreadyCounterOffered(BallotId),

    #[error("no counter-offer exists for ballot {0}")]
    CounterOfferNotExists(BallotId),

    #[error("the counter-offer on ballot {0} was already actioned")]
    CounterOfferAlreadyActioned(BallotId),

    #[error("counter-offer deposit must be non-zero")]
    ZeroDeposit,

    #[error("no claimable deposit for {holder} on ballot {ballot}")]
    NoDepositClaim {
        ballot: BallotId,
        holder: HolderAddress,
    },

    #[error("amount overflow")]
    Overflow,

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}
