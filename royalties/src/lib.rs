//! Cumulative royalty distribution for the chorus protocol.
//!
//! Royalty income arrives as discrete deposits against a reference token.
//! Each deposit is tagged with a fresh ledger snapshot, freezing who is
//! eligible and in what proportion; holders then pull their accrued share
//! whenever they like. Deposits cost O(1) regardless of holder count; a
//! claim costs O(deposits since that holder's last claim).

pub mod distributor;
pub mod error;
pub mod stream;

pub use distributor::RoyaltyDistributor;
pub use error::RoyaltyError;
pub use stream::{DepositIndex, RoyaltyDeposit, RoyaltyStream};
