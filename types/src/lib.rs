//! Fundamental types for the chorus protocol.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: holder addresses, token and snapshot identifiers, block
//! heights, exact threshold ratios, and protocol parameters.

pub mod address;
pub mod height;
pub mod params;
pub mod ratio;
pub mod token;

pub use address::HolderAddress;
pub use height::BlockHeight;
pub use params::ProtocolParams;
pub use ratio::Ratio;
pub use token::{SnapshotId, TokenId};
