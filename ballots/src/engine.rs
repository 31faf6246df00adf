//! Ballot resolution engine — create, vote, negotiate, resolve.
//!
//! Weighting is evaluated lazily at resolution time: `declare_winner` reads
//! every voter's **current** ledger balance, so transfers of the reference
//! token between vote casting and resolution move real weight. Weights are
//! never snapshotted at cast time.

use crate::ballot::{Ballot, BallotId, Verdict};
use crate::error::BallotError;
use crate::offer::{CounterOffer, OfferStatus};
use chorus_ledger::LedgerView;
use chorus_types::{BlockHeight, HolderAddress, ProtocolParams, TokenId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Manages the full lifecycle of weighted yes/no ballots.
pub struct BallotEngine {
    next_ballot_id: BallotId,
    ballots: HashMap<BallotId, Ballot>,
    /// Escrowed counter-offer deposits claimable per ballot and holder.
    deposit_claims: HashMap<(BallotId, HolderAddress), u128>,
    params: ProtocolParams,
}

impl BallotEngine {
    pub fn new(params: ProtocolParams) -> Self {
        Self {
            next_ballot_id: 1,
            ballots: HashMap::new(),
            deposit_claims: HashMap::new(),
            params,
        }
    }

    /// Create a ballot over `reference_token` with a voting window of
    /// `voting_interval_blocks` from `now`.
    pub fn create_ballot(
        &mut self,
        creator: &HolderAddress,
        creator_can_vote: bool,
        reference_token: TokenId,
        ledger: &impl LedgerView,
        now: BlockHeight,
    ) -> Result<BallotId, BallotError> {
        if !ledger.token_exists(reference_token) {
            return Err(BallotError::InvalidToken(reference_token));
        }
        let id = self.next_ballot_id;
        self.next_ballot_id = id.checked_add(1).ok_or(BallotError::Overflow)?;
        let deadline = now.plus(self.params.voting_interval_blocks);
        self.ballots.insert(
            id,
            Ballot::new(id, reference_token, creator.clone(), creator_can_vote, deadline),
        );
        tracing::debug!(ballot = id, token = %reference_token, %deadline, "ballot created");
        Ok(id)
    }

    /// Record a yes/no choice for `voter`.
    ///
    /// The choice alone is recorded; the voter's weight is read from the
    /// ledger only at resolution.
    pub fn cast_vote(
        &mut self,
        ballot_id: BallotId,
        voter: &HolderAddress,
        choice: bool,
        now: BlockHeight,
    ) -> Result<(), BallotError> {
        let ballot = self
            .ballots
            .get_mut(&ballot_id)
            .ok_or(BallotError::BallotNotFound(ballot_id))?;
        if ballot.has_voted(voter) {
            return Err(BallotError::AlreadyVoted(voter.clone()));
        }
        if *voter == ballot.creator && !ballot.creator_can_vote {
            return Err(BallotError::OwnerCannotVote);
        }
        if ballot.resolved || now >= ballot.deadline {
            return Err(BallotError::VotingClosed(ballot_id));
        }
        if ballot.offer_pending() {
            return Err(BallotError::AlreadyCounterOffered(ballot_id));
        }
        ballot.votes.insert(voter.clone(), choice);
        tracing::debug!(ballot = ballot_id, voter = %voter, choice, "vote cast");
        Ok(())
    }

    /// Resolve a ballot whose deadline has passed.
    ///
    /// Reads every recorded voter's current balance and the current total
    /// supply, applies the turnout threshold and then the supermajority
    /// rule, and freezes the ballot.
    pub fn declare_winner(
        &mut self,
        ballot_id: BallotId,
        ledger: &impl LedgerView,
        now: BlockHeight,
    ) -> Result<Verdict, BallotError> {
        let ballot = self
            .ballots
            .get_mut(&ballot_id)
            .ok_or(BallotError::BallotNotFound(ballot_id))?;
        if ballot.resolved {
            return Err(BallotError::AlreadyResolved(ballot_id));
        }
        if now < ballot.deadline {
            return Err(BallotError::VotingNotOver {
                id: ballot_id,
                deadline: ballot.deadline,
                now,
            });
        }

        let mut yes_weight = 0u128;
        let mut no_weight = 0u128;
        for (voter, &choice) in &ballot.votes {
            let weight = ledger.balance_of(voter, ballot.reference_token)?;
            if choice {
                yes_weight = yes_weight.checked_add(weight).ok_or(BallotError::Overflow)?;
            } else {
                no_weight = no_weight.checked_add(weight).ok_or(BallotError::Overflow)?;
            }
        }
        let cast_weight = yes_weight
            .checked_add(no_weight)
            .ok_or(BallotError::Overflow)?;
        let total_supply = ledger.total_supply(ballot.reference_token)?;

        let min_turnout_met = self
            .params
            .min_turnout
            .met_by(cast_weight, total_supply)
            .ok_or(BallotError::Overflow)?;
        let result = min_turnout_met
            && self
                .params
                .supermajority
                .exceeded_by(yes_weight, cast_weight)
                .ok_or(BallotError::Overflow)?;

        ballot.resolved = true;
        ballot.result = result;
        ballot.min_turnout_met = min_turnout_met;
        tracing::info!(
            ballot = ballot_id,
            yes = yes_weight,
            no = no_weight,
            supply = total_supply,
            turnout_met = min_turnout_met,
            result,
            "ballot resolved"
        );
        Ok(Verdict {
            result,
            min_turnout_met,
            yes_weight,
            no_weight,
            total_supply,
        })
    }

    /// Open the ballot's one negotiation cycle, escrowing `deposit`.
    ///
    /// Only a holder who has not voted may propose, and only while no offer
    /// was ever made for the ballot.
    pub fn create_counter_offer(
        &mut self,
        ballot_id: BallotId,
        proposer: &HolderAddress,
        deposit: u128,
        now: BlockHeight,
    ) -> Result<(), BallotError> {
        let ballot = self
            .ballots
            .get_mut(&ballot_id)
            .ok_or(BallotError::BallotNotFound(ballot_id))?;
        if deposit == 0 {
            return Err(BallotError::ZeroDeposit);
        }
        if *proposer == ballot.creator {
            return Err(BallotError::OwnerCannotOffer);
        }
        if ballot.has_voted(proposer) {
            return Err(BallotError::AlreadyVoted(proposer.clone()));
        }
        if ballot.offer.is_some() {
            return Err(BallotError::AlreadyCounterOffered(ballot_id));
        }
        if ballot.resolved || now >= ballot.deadline {
            return Err(BallotError::VotingClosed(ballot_id));
        }
        ballot.offer = Some(CounterOffer {
            proposer: proposer.clone(),
            deposit,
            status: OfferStatus::Pending,
        });
        tracing::debug!(ballot = ballot_id, proposer = %proposer, deposit, "counter-offer opened");
        Ok(())
    }

    /// Accept or reject the pending counter-offer. Ballot owner only.
    ///
    /// Accepting records the proposer as a yes-voter and makes the deposit
    /// claimable by the proposer; rejecting records a no-vote and forfeits
    /// the deposit to the ballot owner. Resolution then treats the proposer
    /// exactly as a normal voter of that choice.
    pub fn counter_offer_action(
        &mut self,
        ballot_id: BallotId,
        caller: &HolderAddress,
        accept: bool,
        _now: BlockHeight,
    ) -> Result<(), BallotError> {
        let ballot = self
            .ballots
            .get_mut(&ballot_id)
            .ok_or(BallotError::BallotNotFound(ballot_id))?;
        if *caller != ballot.creator {
            return Err(BallotError::OnlyBallotOwner);
        }
        let offer = ballot
            .offer
            .as_mut()
            .ok_or(BallotError::CounterOfferNotExists(ballot_id))?;
        if offer.status != OfferStatus::Pending {
            return Err(BallotError::CounterOfferAlreadyActioned(ballot_id));
        }
        if ballot.resolved {
            return Err(BallotError::VotingClosed(ballot_id));
        }

        let proposer = offer.proposer.clone();
        let deposit = offer.deposit;
        let beneficiary;
        if accept {
            offer.status = OfferStatus::Accepted;
            ballot.votes.insert(proposer.clone(), true);
            beneficiary = proposer.clone();
        } else {
            offer.status = OfferStatus::Rejected;
            ballot.votes.insert(proposer.clone(), false);
            beneficiary = ballot.creator.clone();
        }
        let claim = self
            .deposit_claims
            .entry((ballot_id, beneficiary.clone()))
            .or_insert(0);
        *claim = claim.checked_add(deposit).ok_or(BallotError::Overflow)?;
        tracing::info!(
            ballot = ballot_id,
            proposer = %proposer,
            accept,
            deposit,
            beneficiary = %beneficiary,
            "counter-offer actioned"
        );
        Ok(())
    }

    /// Pay out an escrowed deposit credited to `caller` on `ballot_id`.
    pub fn claim_offer_deposit(
        &mut self,
        ballot_id: BallotId,
        caller: &HolderAddress,
    ) -> Result<u128, BallotError> {
        let amount = self
            .deposit_claims
            .remove(&(ballot_id, caller.clone()))
            .ok_or_else(|| BallotError::NoDepositClaim {
                ballot: ballot_id,
                holder: caller.clone(),
            })?;
        tracing::info!(ballot = ballot_id, holder = %caller, amount, "offer deposit claimed");
        Ok(amount)
    }

    /// Get a ballot by id.
    pub fn ballot(&self, ballot_id: BallotId) -> Option<&Ballot> {
        self.ballots.get(&ballot_id)
    }

    /// Number of ballots ever created on this engine.
    pub fn ballot_count(&self) -> usize {
        self.ballots.len()
    }

    /// Escrowed deposit currently claimable by `holder` on `ballot_id`.
    pub fn claimable_deposit(&self, ballot_id: BallotId, holder: &HolderAddress) -> u128 {
        self.deposit_claims
            .get(&(ballot_id, holder.clone()))
            .copied()
            .unwrap_or(0)
    }
}

impl Default for BallotEngine {
    fn default() -> Self {
        Self::new(ProtocolParams::default())
    }
}

/// Meta-store key used for persisting the ballot engine state.
const BALLOT_ENGINE_META_KEY: &str = "ballot_engine_state";

/// Serializable snapshot of the engine's in-memory state.
#[derive(Serialize, Deserialize)]
pub struct BallotEngineState {
    pub next_ballot_id: BallotId,
    pub ballots: HashMap<BallotId, Ballot>,
    pub deposit_claims: HashMap<(BallotId, HolderAddress), u128>,
    pub params: ProtocolParams,
}

impl BallotEngine {
    /// Serialize the engine state to bytes for persistence.
    pub fn save_state(&self) -> Vec<u8> {
        let state = BallotEngineState {
            next_ballot_id: self.next_ballot_id,
            ballots: self.ballots.clone(),
            deposit_claims: self.deposit_claims.clone(),
            params: self.params.clone(),
        };
        bincode::serialize(&state).unwrap_or_default()
    }

    /// Restore an engine from serialized bytes.
    pub fn load_state(data: &[u8]) -> Self {
        match bincode::deserialize::<BallotEngineState>(data) {
            Ok(state) => Self {
                next_ballot_id: state.next_ballot_id,
                ballots: state.ballots,
                deposit_claims: state.deposit_claims,
                params: state.params,
            },
            Err(_) => Self::default(),
        }
    }

    /// The meta-store key used for ballot engine persistence.
    pub fn meta_key() -> &'static str {
        BALLOT_ENGINE_META_KEY
    }
}
