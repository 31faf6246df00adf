//! Holder address type with `chrs_` prefix.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A chorus holder address, always prefixed with `chrs_`.
///
/// Identifies an account on the multi-asset ledger: a voter, a royalty
/// claimant, a depositor, or a platform treasury.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HolderAddress(String);

impl HolderAddress {
    /// The standard prefix for all chorus holder addresses.
    pub const PREFIX: &'static str = "chrs_";

    /// Create a new holder address from a raw string.
    ///
    /// # Panics
    /// Panics if the string does not start with `chrs_`.
    pub fn new(raw: impl Into<String>) -> Self {
        let s = raw.into();
        assert!(s.starts_with(Self::PREFIX), "address must start with chrs_");
        Self(s)
    }

    /// Return the raw address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Validate that this address is well-formed.
    pub fn is_valid(&self) -> bool {
        self.0.starts_with(Self::PREFIX) && self.0.len() > Self::PREFIX.len()
    }
}

impl fmt::Display for HolderAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for HolderAddress {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}
