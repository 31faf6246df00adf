//! Ballot-gated supply dilution for the chorus protocol.
//!
//! An asset's supply can only grow through a dilution request: the request
//! is checked against a global supply ceiling and a per-asset cooldown, then
//! put to the token holders as a ballot. An approved ballot mints into the
//! treasury; a rejected one mints nothing. Either outcome starts the next
//! cooldown window.

pub mod controller;
pub mod error;
pub mod request;

pub use controller::DilutionController;
pub use error::DilutionError;
pub use request::{DilutionRequest, RequestId};
