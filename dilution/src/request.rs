//! Dilution request records.

use chorus_ballots::BallotId;
use chorus_types::{BlockHeight, TokenId};
use serde::{Deserialize, Serialize};

/// Unique identifier for a dilution request, scoped to one controller.
pub type RequestId = u64;

/// A pending or resolved request to grow an asset's supply.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DilutionRequest {
    pub id: RequestId,
    /// The asset whose supply would grow.
    pub reference_token: TokenId,
    /// How much would be minted on approval.
    pub requested_amount: u128,
    /// The ballot gating this request.
    pub ballot: BallotId,
    pub created_at: BlockHeight,
    /// Whether the gating ballot has been resolved through the controller.
    pub resolved: bool,
    /// Whether the mint happened, meaningful only once `resolved`.
    pub approved: bool,
}
