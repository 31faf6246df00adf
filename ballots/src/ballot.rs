//! Ballot state and resolution verdicts.

use crate::offer::{CounterOffer, OfferStatus};
use chorus_types::{BlockHeight, HolderAddress, TokenId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Unique identifier for a ballot, scoped to one engine instance.
pub type BallotId = u64;

/// A single weighted yes/no ballot.
///
/// Created once, mutated only by vote casting and resolution, and frozen
/// after resolution.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Ballot {
    pub id: BallotId,
    /// The token whose holdings weight the votes.
    pub reference_token: TokenId,
    /// Who created the ballot.
    pub creator: HolderAddress,
    /// Whether the creator may cast a vote themselves.
    pub creator_can_vote: bool,
    /// First block at which voting is no longer possible.
    pub deadline: BlockHeight,
    pub resolved: bool,
    /// Outcome, meaningful only once `resolved`.
    pub result: bool,
    /// Whether the turnout threshold was met at resolution.
    pub min_turnout_met: bool,
    /// Recorded choices. Weight is *not* captured here.
    pub(crate) votes: HashMap<HolderAddress, bool>,
    /// The one optional negotiation cycle.
    pub(crate) offer: Option<CounterOffer>,
}

impl Ballot {
    pub(crate) fn new(
        id: BallotId,
        reference_token: TokenId,
        creator: HolderAddress,
        creator_can_vote: bool,
        deadline: BlockHeight,
    ) -> Self {
        Self {
            id,
            reference_token,
            creator,
            creator_can_vote,
            deadline,
            resolved: false,
            result: false,
            min_turnout_met: false,
            votes: HashMap::new(),
            offer: None,
        }
    }

    /// Whether this holder has a recorded choice on the ballot.
    pub fn has_voted(&self, holder: &HolderAddress) -> bool {
        self.votes.contains_key(holder)
    }

    /// The recorded choice of a holder, if any.
    pub fn choice_of(&self, holder: &HolderAddress) -> Option<bool> {
        self.votes.get(holder).copied()
    }

    /// Number of recorded voters.
    pub fn vote_count(&self) -> usize {
        self.votes.len()
    }

    /// Whether the voting window is still open at `now`.
    pub fn is_open(&self, now: BlockHeight) -> bool {
        !self.resolved && now < self.deadline
    }

    /// The attached counter-offer, if one was ever made.
    pub fn offer(&self) -> Option<&CounterOffer> {
        self.offer.as_ref()
    }

    /// Whether a counter-offer is pending (made but not yet actioned).
    pub fn offer_pending(&self) -> bool {
        self.offer
            .as_ref()
            .is_some_and(|o| o.status == OfferStatus::Pending)
    }
}

/// The outcome of resolving a ballot, with the tally it was computed from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    /// Whether the ballot passed.
    pub result: bool,
    /// Whether the turnout threshold was met.
    pub min_turnout_met: bool,
    /// Summed live balances of yes-voters.
    pub yes_weight: u128,
    /// Summed live balances of no-voters.
    pub no_weight: u128,
    /// Live total supply of the reference token at resolution.
    pub total_supply: u128,
}

impl Verdict {
    /// Total weight cast, yes plus no.
    pub fn cast_weight(&self) -> u128 {
        self.yes_weight.saturating_add(self.no_weight)
    }
}
