//! Weighted yes/no ballots for the chorus protocol.
//!
//! A ballot is a single yes/no question about one reference token, with a
//! fixed voting window. Voting power is the voter's holding of the reference
//! token, read from the ledger **at resolution time** — deliberately not at
//! vote-cast time, so transfers up until resolution move real weight.
//!
//! The counter-offer extension adds at most one negotiation cycle per
//! ballot: a non-voter escrows a deposit, ordinary voting pauses for anyone
//! who has not yet voted, and the ballot owner's accept/reject turns the
//! proposer into a recorded voter.

pub mod ballot;
pub mod engine;
pub mod error;
pub mod offer;

pub use ballot::{Ballot, BallotId, Verdict};
pub use engine::BallotEngine;
pub use error::BallotError;
pub use offer::{CounterOffer, OfferStatus};
