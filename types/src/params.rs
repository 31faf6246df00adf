//! Protocol parameters for ballots, royalty distribution, and dilution.

use crate::ratio::Ratio;
use serde::{Deserialize, Serialize};

/// All tunable parameters consumed by the governance and royalty engines.
///
/// Stored by every engine instance at construction; a deployment that wants
/// different thresholds builds its engines from a different set.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProtocolParams {
    // ── Ballots ──────────────────────────────────────────────────────────
    /// Length of every ballot's voting window, in blocks from creation.
    pub voting_interval_blocks: u64,

    /// Minimum turnout: fraction of the live total supply that must have
    /// cast a vote for a ballot to possibly pass. Default: 1/10.
    pub min_turnout: Ratio,

    /// Supermajority: fraction of cast weight that yes-weight must strictly
    /// exceed for a ballot to pass. Default: 2/3.
    pub supermajority: Ratio,

    // ── Royalties ────────────────────────────────────────────────────────
    /// Minimum size of a royalty deposit relative to the reference token's
    /// live supply. Below this floor, integer division would round every
    /// small claimant to zero. Default: 1/1_000_000 — at least one smallest
    /// payout unit per million units of supply.
    pub min_deposit_ratio: Ratio,

    // ── Dilution ─────────────────────────────────────────────────────────
    /// Hard ceiling on any asset's total supply after a dilution mint.
    pub supply_ceiling: u128,

    /// Blocks that must elapse after a dilution ballot resolves (win or
    /// lose) before the same asset may request dilution again.
    pub dilution_cooldown_blocks: u64,
}

impl Default for ProtocolParams {
    fn default() -> Self {
        Self {
            voting_interval_blocks: 10_000,
            min_turnout: Ratio::new(1, 10),
            supermajority: Ratio::new(2, 3),
            min_deposit_ratio: Ratio::new(1, 1_000_000),
            supply_ceiling: 1_000_000_000,
            dilution_cooldown_blocks: 50_000,
        }
    }
}
