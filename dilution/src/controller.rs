//! The dilution controller — gates supply growth behind holder ballots.

use crate::error::DilutionError;
use crate::request::{DilutionRequest, RequestId};
use chorus_ballots::BallotEngine;
use chorus_ledger::{LedgerMutator, LedgerView};
use chorus_types::{BlockHeight, HolderAddress, ProtocolParams, TokenId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Admits dilution requests and executes approved mints.
///
/// The cooldown for an asset runs from the block at which its previous
/// request's ballot was resolved, win or lose.
pub struct DilutionController {
    next_request_id: RequestId,
    requests: HashMap<RequestId, DilutionRequest>,
    /// Per asset: block at which the last gating ballot was resolved.
    last_resolved: HashMap<TokenId, BlockHeight>,
    /// Holder receiving approved mints.
    treasury: HolderAddress,
    params: ProtocolParams,
}

impl DilutionController {
    pub fn new(treasury: HolderAddress, params: ProtocolParams) -> Self {
        Self {
            next_request_id: 1,
            requests: HashMap::new(),
            last_resolved: HashMap::new(),
            treasury,
            params,
        }
    }

    /// Open a dilution request, creating its gating ballot.
    ///
    /// The requester becomes the ballot creator but is barred from voting
    /// on it. Fails if the asset is unknown, the ceiling would be breached,
    /// or the asset's cooldown window is still running.
    pub fn request_dilution(
        &mut self,
        reference_token: TokenId,
        requester: &HolderAddress,
        amount: u128,
        ballots: &mut BallotEngine,
        ledger: &impl LedgerView,
        now: BlockHeight,
    ) -> Result<RequestId, DilutionError> {
        if !ledger.token_exists(reference_token) {
            return Err(DilutionError::InvalidAsset(reference_token));
        }
        if amount == 0 {
            return Err(DilutionError::ZeroAmount);
        }
        let supply = ledger.total_supply(reference_token)?;
        let grown = supply.checked_add(amount).ok_or(DilutionError::Overflow)?;
        if grown > self.params.supply_ceiling {
            return Err(DilutionError::SupplyLimitReached {
                supply,
                requested: amount,
                ceiling: self.params.supply_ceiling,
            });
        }
        if let Some(resolved_at) = self.last_resolved.get(&reference_token) {
            if !resolved_at.has_elapsed(self.params.dilution_cooldown_blocks, now) {
                let remaining = self.params.dilution_cooldown_blocks
                    - resolved_at.elapsed_since(now);
                return Err(DilutionError::WaitCooldown {
                    token: reference_token,
                    remaining,
                });
            }
        }

        let ballot = ballots.create_ballot(requester, false, reference_token, ledger, now)?;
        let id = self.next_request_id;
        self.next_request_id = id.checked_add(1).ok_or(DilutionError::Overflow)?;
        self.requests.insert(
            id,
            DilutionRequest {
                id,
                reference_token,
                requested_amount: amount,
                ballot,
                created_at: now,
                resolved: false,
                approved: false,
            },
        );
        tracing::info!(
            request = id,
            token = %reference_token,
            amount,
            ballot,
            "dilution requested"
        );
        Ok(id)
    }

    /// Resolve a request's gating ballot and execute the outcome.
    ///
    /// On approval, mints the requested amount into the treasury. Either
    /// outcome stamps the asset's resolution block, starting the next
    /// cooldown window. Returns whether the mint happened.
    pub fn resolve_dilution(
        &mut self,
        request_id: RequestId,
        ballots: &mut BallotEngine,
        ledger: &mut impl LedgerMutator,
        now: BlockHeight,
    ) -> Result<bool, DilutionError> {
        let request = self
            .requests
            .get(&request_id)
            .ok_or(DilutionError::RequestNotFound(request_id))?;
        if request.resolved {
            return Err(DilutionError::AlreadyResolved(request_id));
        }
        let token = request.reference_token;
        let amount = request.requested_amount;
        let ballot = request.ballot;

        // The ceiling was checked at request time against a supply that may
        // have moved since; re-check so the mint below cannot overflow or
        // overshoot after the ballot is frozen.
        let supply = ledger.total_supply(token)?;
        let grown = supply.checked_add(amount).ok_or(DilutionError::Overflow)?;
        if grown > self.params.supply_ceiling {
            return Err(DilutionError::SupplyLimitReached {
                supply,
                requested: amount,
                ceiling: self.params.supply_ceiling,
            });
        }

        let verdict = ballots.declare_winner(ballot, &*ledger, now)?;
        if verdict.result {
            ledger.mint(token, amount, &self.treasury)?;
        }

        let request = self
            .requests
            .get_mut(&request_id)
            .ok_or(DilutionError::RequestNotFound(request_id))?;
        request.resolved = true;
        request.approved = verdict.result;
        self.last_resolved.insert(token, now);
        tracing::info!(
            request = request_id,
            token = %token,
            amount,
            approved = verdict.result,
            "dilution resolved"
        );
        Ok(verdict.result)
    }

    /// A request by id.
    pub fn request(&self, request_id: RequestId) -> Option<&DilutionRequest> {
        self.requests.get(&request_id)
    }

    /// Block at which the asset's last gating ballot was resolved.
    pub fn last_resolved(&self, reference_token: TokenId) -> Option<BlockHeight> {
        self.last_resolved.get(&reference_token).copied()
    }

    /// The treasury receiving approved mints.
    pub fn treasury(&self) -> &HolderAddress {
        &self.treasury
    }
}

/// Meta-store key used for persisting the controller state.
const DILUTION_CONTROLLER_META_KEY: &str = "dilution_controller_state";

/// Serializable snapshot of the controller's in-memory state.
#[derive(Serialize, Deserialize)]
pub struct DilutionControllerState {
    pub next_request_id: RequestId,
    pub requests: HashMap<RequestId, DilutionRequest>,
    pub last_resolved: HashMap<TokenId, BlockHeight>,
    pub treasury: HolderAddress,
    pub params: ProtocolParams,
}

impl DilutionController {
    /// Serialize the controller state to bytes for persistence.
    pub fn save_state(&self) -> Vec<u8> {
        let state = DilutionControllerState {
            next_request_id: self.next_request_id,
            requests: self.requests.clone(),
            last_resolved: self.last_resolved.clone(),
            treasury: self.treasury.clone(),
            params: self.params.clone(),
        };
        bincode::serialize(&state).unwrap_or_default()
    }

    /// Restore a controller from serialized bytes, or `None` if the bytes
    /// do not parse.
    pub fn load_state(data: &[u8]) -> Option<Self> {
        let state = bincode::deserialize::<DilutionControllerState>(data).ok()?;
        Some(Self {
            next_request_id: state.next_request_id,
            requests: state.requests,
            last_resolved: state.last_resolved,
            treasury: state.treasury,
            params: state.params,
        })
    }

    /// The meta-store key used for controller persistence.
    pub fn meta_key() -> &'static str {
        DILUTION_CONTROLLER_META_KEY
    }
}
