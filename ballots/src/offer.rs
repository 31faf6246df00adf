//! Counter-offer negotiation state.

use chorus_types::HolderAddress;
use serde::{Deserialize, Serialize};

/// Lifecycle of a counter-offer: `Pending` until the ballot owner acts,
/// then terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OfferStatus {
    Pending,
    Accepted,
    Rejected,
}

/// A one-shot negotiation attached to a ballot.
///
/// While pending, holders who have not yet voted are barred from voting.
/// The escrowed deposit is paid out through the engine's claims map once
/// the offer is actioned.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CounterOffer {
    pub proposer: HolderAddress,
    pub deposit: u128,
    pub status: OfferStatus,
}
