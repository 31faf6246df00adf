//! Block height type used for deadlines and cooldowns.
//!
//! The core never reads a clock: "time" is an externally advanced block
//! counter, passed into every deadline- or cooldown-sensitive operation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A block height on the external chain of serialized operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BlockHeight(u64);

impl BlockHeight {
    /// The genesis height.
    pub const ZERO: Self = Self(0);

    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }

    /// The height `blocks` after this one, saturating at the maximum.
    pub fn plus(&self, blocks: u64) -> Self {
        Self(self.0.saturating_add(blocks))
    }

    /// Blocks elapsed since this height (zero if `now` is earlier).
    pub fn elapsed_since(&self, now: BlockHeight) -> u64 {
        now.0.saturating_sub(self.0)
    }

    /// Whether `blocks` have fully elapsed since this height.
    pub fn has_elapsed(&self, blocks: u64, now: BlockHeight) -> bool {
        now.0 >= self.0.saturating_add(blocks)
    }
}

impl fmt::Display for BlockHeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
