//! The royalty distributor — deposits in, lazy pull claims out.

use crate::error::RoyaltyError;
use crate::stream::{DepositIndex, RoyaltyDeposit, RoyaltyStream};
use chorus_ledger::{LedgerMutator, LedgerView};
use chorus_types::{HolderAddress, ProtocolParams, TokenId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Distributes deposited royalty value to reference-token holders in
/// proportion to their holdings at each deposit's snapshot.
///
/// Deposited value is escrowed in the distributor's vault account and paid
/// out in `payout_token`. Sub-unit remainders from integer division stay in
/// the vault permanently.
pub struct RoyaltyDistributor {
    /// Token all deposits and payouts are denominated in.
    payout_token: TokenId,
    /// Holder account escrowing deposited value until claimed.
    vault: HolderAddress,
    streams: HashMap<TokenId, RoyaltyStream>,
    params: ProtocolParams,
}

impl RoyaltyDistributor {
    pub fn new(payout_token: TokenId, vault: HolderAddress, params: ProtocolParams) -> Self {
        Self {
            payout_token,
            vault,
            streams: HashMap::new(),
            params,
        }
    }

    /// Record a royalty deposit against `reference_token`.
    ///
    /// Moves `amount` of the payout token from the depositor into the vault
    /// and tags the deposit with a fresh snapshot of the reference token, so
    /// eligibility is frozen at this instant.
    pub fn deposit(
        &mut self,
        reference_token: TokenId,
        depositor: &HolderAddress,
        amount: u128,
        ledger: &mut impl LedgerMutator,
    ) -> Result<DepositIndex, RoyaltyError> {
        let supply = ledger.total_supply(reference_token)?;
        if supply == 0 {
            return Err(RoyaltyError::NoHolders(reference_token));
        }
        let granular = self
            .params
            .min_deposit_ratio
            .met_by(amount, supply)
            .ok_or(RoyaltyError::Overflow)?;
        if !granular {
            return Err(RoyaltyError::InsufficientAmount { amount, supply });
        }

        ledger.transfer(self.payout_token, depositor, &self.vault, amount)?;
        let snapshot = ledger.snapshot(reference_token)?;

        let stream = self.streams.entry(reference_token).or_default();
        let index = stream.deposits.len() as DepositIndex;
        stream.deposits.push(RoyaltyDeposit {
            index,
            amount,
            snapshot,
            depositor: depositor.clone(),
        });
        tracing::info!(
            token = %reference_token,
            index,
            amount,
            snapshot = %snapshot,
            depositor = %depositor,
            "royalty deposit recorded"
        );
        Ok(index)
    }

    /// Pay out every deposit the holder has not yet claimed.
    ///
    /// Each unclaimed deposit contributes
    /// `balance_at(snapshot) * amount / supply_at(snapshot)`; the summed
    /// share is transferred from the vault and the holder's cursor jumps to
    /// the stream head. A holder whose every unclaimed share rounds to zero
    /// still advances the cursor.
    pub fn claim(
        &mut self,
        reference_token: TokenId,
        holder: &HolderAddress,
        ledger: &mut impl LedgerMutator,
    ) -> Result<u128, RoyaltyError> {
        let stream = self
            .streams
            .get_mut(&reference_token)
            .filter(|s| !s.deposits.is_empty())
            .ok_or(RoyaltyError::NoRoyaltyPayments(reference_token))?;
        let cursor = stream.cursor_of(holder) as usize;
        let len = stream.deposits.len();
        if cursor == len {
            return Err(RoyaltyError::NoPendingClaims {
                token: reference_token,
                holder: holder.clone(),
            });
        }

        let total = accrued_share(
            &stream.deposits[cursor..],
            reference_token,
            holder,
            &*ledger,
        )?;
        if total > 0 {
            ledger.transfer(self.payout_token, &self.vault, holder, total)?;
        }
        stream.cursors.insert(holder.clone(), len as DepositIndex);
        tracing::info!(
            token = %reference_token,
            holder = %holder,
            claimed = total,
            deposits = len - cursor,
            "royalties claimed"
        );
        Ok(total)
    }

    /// What `claim` would currently pay the holder, without mutating
    /// anything. Returns zero for an empty or fully claimed stream.
    pub fn pending(
        &self,
        reference_token: TokenId,
        holder: &HolderAddress,
        ledger: &impl LedgerView,
    ) -> Result<u128, RoyaltyError> {
        let Some(stream) = self.streams.get(&reference_token) else {
            return Ok(0);
        };
        let cursor = stream.cursor_of(holder) as usize;
        accrued_share(&stream.deposits[cursor..], reference_token, holder, ledger)
    }

    /// Number of deposits ever made against `reference_token`.
    pub fn stream_len(&self, reference_token: TokenId) -> u64 {
        self.streams
            .get(&reference_token)
            .map(RoyaltyStream::len)
            .unwrap_or(0)
    }

    /// The stream for a reference token, if any deposit was ever made.
    pub fn stream(&self, reference_token: TokenId) -> Option<&RoyaltyStream> {
        self.streams.get(&reference_token)
    }

    /// The vault account escrowing undistributed value.
    pub fn vault(&self) -> &HolderAddress {
        &self.vault
    }
}

/// Sum the holder's share of each given deposit via the snapshots the
/// deposits were tagged with.
fn accrued_share(
    deposits: &[RoyaltyDeposit],
    reference_token: TokenId,
    holder: &HolderAddress,
    ledger: &impl LedgerView,
) -> Result<u128, RoyaltyError> {
    let mut total = 0u128;
    for deposit in deposits {
        let balance = ledger.balance_of_at(holder, deposit.snapshot, reference_token)?;
        let supply = ledger.total_supply_at(deposit.snapshot, reference_token)?;
        // Deposits are only recorded while the reference token has supply
        // (checked in `deposit`), so `supply` is non-zero here.
        if supply == 0 {
            continue;
        }
        let share = balance
            .checked_mul(deposit.amount)
            .ok_or(RoyaltyError::Overflow)?
            / supply;
        total = total.checked_add(share).ok_or(RoyaltyError::Overflow)?;
    }
    Ok(total)
}

/// Meta-store key used for persisting the distributor state.
const ROYALTY_DISTRIBUTOR_META_KEY: &str = "royalty_distributor_state";

/// Serializable snapshot of the distributor's in-memory state.
#[derive(Serialize, Deserialize)]
pub struct RoyaltyDistributorState {
    pub payout_token: TokenId,
    pub vault: HolderAddress,
    pub streams: HashMap<TokenId, RoyaltyStream>,
    pub params: ProtocolParams,
}

impl RoyaltyDistributor {
    /// Serialize the distributor state to bytes for persistence.
    pub fn save_state(&self) -> Vec<u8> {
        let state = RoyaltyDistributorState {
            payout_token: self.payout_token,
            vault: self.vault.clone(),
            streams: self.streams.clone(),
            params: self.params.clone(),
        };
        bincode::serialize(&state).unwrap_or_default()
    }

    /// Restore a distributor from serialized bytes, or `None` if the bytes
    /// do not parse.
    pub fn load_state(data: &[u8]) -> Option<Self> {
        let state = bincode::deserialize::<RoyaltyDistributorState>(data).ok()?;
        Some(Self {
            payout_token: state.payout_token,
            vault: state.vault,
            streams: state.streams,
            params: state.params,
        })
    }

    /// The meta-store key used for distributor persistence.
    pub fn meta_key() -> &'static str {
        ROYALTY_DISTRIBUTOR_META_KEY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chorus_nullables::NullLedger;

    const SHARES: TokenId = TokenId::new(1);
    const CASH: TokenId = TokenId::new(2);

    fn holder(name: &str) -> HolderAddress {
        HolderAddress::new(format!("chrs_{name}"))
    }

    fn vault() -> HolderAddress {
        holder("vault")
    }

    fn distributor() -> RoyaltyDistributor {
        RoyaltyDistributor::new(CASH, vault(), ProtocolParams::default())
    }

    /// Shares ledger plus a cash book funding the depositor.
    fn setup(share_balances: &[(&str, u128)]) -> (NullLedger, HolderAddress) {
        let ledger = NullLedger::new();
        let holders: Vec<HolderAddress> =
            share_balances.iter().map(|(n, _)| holder(n)).collect();
        let pairs: Vec<(&HolderAddress, u128)> = holders
            .iter()
            .zip(share_balances.iter())
            .map(|(h, (_, b))| (h, *b))
            .collect();
        ledger.register_with_balances(SHARES, &pairs);
        let label = holder("label");
        ledger.register_with_balances(CASH, &[(&label, 1_000_000_000)]);
        (ledger, label)
    }

    #[test]
    fn test_deposit_with_no_supply() {
        let mut ledger = NullLedger::new();
        ledger.register_token(SHARES);
        let label = holder("label");
        ledger.register_with_balances(CASH, &[(&label, 1_000_000)]);
        let mut dist = distributor();
        assert_eq!(
            dist.deposit(SHARES, &label, 1000, &mut ledger),
            Err(RoyaltyError::NoHolders(SHARES))
        );
    }

    #[test]
    fn test_deposit_below_granularity() {
        // Supply of 10M needs at least 10 units per the 1/1M default floor.
        let (mut ledger, label) = setup(&[("alice", 10_000_000)]);
        let mut dist = distributor();
        assert_eq!(
            dist.deposit(SHARES, &label, 9, &mut ledger),
            Err(RoyaltyError::InsufficientAmount {
                amount: 9,
                supply: 10_000_000
            })
        );
        assert!(dist.deposit(SHARES, &label, 10, &mut ledger).is_ok());
    }

    #[test]
    fn test_zero_deposit_rejected() {
        let (mut ledger, label) = setup(&[("alice", 100)]);
        let mut dist = distributor();
        assert!(matches!(
            dist.deposit(SHARES, &label, 0, &mut ledger),
            Err(RoyaltyError::InsufficientAmount { .. })
        ));
    }

    #[test]
    fn test_deposit_escrows_into_vault() {
        let (mut ledger, label) = setup(&[("alice", 100)]);
        let mut dist = distributor();
        dist.deposit(SHARES, &label, 10_000, &mut ledger).unwrap();
        assert_eq!(ledger.balance_of(&vault(), CASH), Ok(10_000));
        assert_eq!(dist.stream_len(SHARES), 1);
        // One snapshot per deposit, taken atomically with it.
        assert_eq!(ledger.snapshot_count(), 1);
    }

    #[test]
    fn test_claim_empty_stream() {
        let (mut ledger, _) = setup(&[("alice", 100)]);
        let mut dist = distributor();
        assert_eq!(
            dist.claim(SHARES, &holder("alice"), &mut ledger),
            Err(RoyaltyError::NoRoyaltyPayments(SHARES))
        );
    }

    #[test]
    fn test_claim_proportional_share() {
        // The 5000-of-450000 holder of a 10000 deposit gets exactly 111.
        let (mut ledger, label) = setup(&[("small", 5_000), ("big", 445_000)]);
        let mut dist = distributor();
        dist.deposit(SHARES, &label, 10_000, &mut ledger).unwrap();

        let small = holder("small");
        let claimed = dist.claim(SHARES, &small, &mut ledger).unwrap();
        assert_eq!(claimed, 111);
        assert_eq!(ledger.balance_of(&small, CASH), Ok(111));

        let big = holder("big");
        let claimed = dist.claim(SHARES, &big, &mut ledger).unwrap();
        assert_eq!(claimed, 445_000u128 * 10_000 / 450_000);
    }

    #[test]
    fn test_claim_twice_fails() {
        let (mut ledger, label) = setup(&[("alice", 100)]);
        let alice = holder("alice");
        let mut dist = distributor();
        dist.deposit(SHARES, &label, 10_000, &mut ledger).unwrap();
        dist.claim(SHARES, &alice, &mut ledger).unwrap();
        assert_eq!(
            dist.claim(SHARES, &alice, &mut ledger),
            Err(RoyaltyError::NoPendingClaims {
                token: SHARES,
                holder: alice.clone()
            })
        );
    }

    #[test]
    fn test_late_acquirer_gets_nothing() {
        let (mut ledger, label) = setup(&[("alice", 1000)]);
        let alice = holder("alice");
        let late = holder("late");
        let mut dist = distributor();
        dist.deposit(SHARES, &label, 10_000, &mut ledger).unwrap();

        // The whole position moves to a new holder after the snapshot.
        ledger.transfer(SHARES, &alice, &late, 1000).unwrap();

        let claimed = dist.claim(SHARES, &late, &mut ledger).unwrap();
        assert_eq!(claimed, 0, "eligibility is fixed at snapshot time");
        assert_eq!(ledger.balance_of(&late, CASH), Ok(0));
        // The seller keeps the full entitlement.
        assert_eq!(dist.claim(SHARES, &alice, &mut ledger), Ok(10_000));
    }

    #[test]
    fn test_incremental_equals_lump_claim() {
        let (mut ledger, label) = setup(&[("a", 600), ("b", 400)]);
        let a = holder("a");
        let b = holder("b");

        // One holder claims between deposits, the other claims once at the
        // end; both must end with the same total.
        let mut dist = distributor();
        dist.deposit(SHARES, &label, 10_000, &mut ledger).unwrap();
        let first = dist.claim(SHARES, &a, &mut ledger).unwrap();
        dist.deposit(SHARES, &label, 5_000, &mut ledger).unwrap();
        let second = dist.claim(SHARES, &a, &mut ledger).unwrap();
        let lump = dist.claim(SHARES, &b, &mut ledger).unwrap();

        assert_eq!(first + second, 600 * 10_000 / 1000 + 600 * 5_000 / 1000);
        assert_eq!(lump, 400 * 10_000 / 1000 + 400 * 5_000 / 1000);
    }

    #[test]
    fn test_eligibility_shifts_per_snapshot() {
        let (mut ledger, label) = setup(&[("a", 1000)]);
        let a = holder("a");
        let b = holder("b");
        let mut dist = distributor();

        dist.deposit(SHARES, &label, 10_000, &mut ledger).unwrap();
        ledger.transfer(SHARES, &a, &b, 500).unwrap();
        dist.deposit(SHARES, &label, 10_000, &mut ledger).unwrap();

        // First deposit is all A's; the second splits evenly.
        assert_eq!(dist.claim(SHARES, &a, &mut ledger), Ok(10_000 + 5_000));
        assert_eq!(dist.claim(SHARES, &b, &mut ledger), Ok(5_000));
    }

    #[test]
    fn test_pending_matches_claim_without_mutation() {
        let (mut ledger, label) = setup(&[("a", 600), ("b", 400)]);
        let a = holder("a");
        let mut dist = distributor();
        dist.deposit(SHARES, &label, 10_000, &mut ledger).unwrap();

        let estimate = dist.pending(SHARES, &a, &ledger).unwrap();
        assert_eq!(estimate, 6_000);
        // The view did not advance the cursor.
        assert_eq!(dist.claim(SHARES, &a, &mut ledger), Ok(6_000));
        assert_eq!(dist.pending(SHARES, &a, &ledger), Ok(0));
    }

    #[test]
    fn test_pending_on_unknown_stream_is_zero() {
        let (ledger, _) = setup(&[("a", 100)]);
        let dist = distributor();
        assert_eq!(dist.pending(SHARES, &holder("a"), &ledger), Ok(0));
    }

    #[test]
    fn test_rounding_remainder_stays_in_vault() {
        // Three equal holders of a 10000 deposit: 3333 each, 1 unit stuck.
        let (mut ledger, label) = setup(&[("a", 1), ("b", 1), ("c", 1)]);
        let mut dist = distributor();
        dist.deposit(SHARES, &label, 10_000, &mut ledger).unwrap();
        for name in ["a", "b", "c"] {
            assert_eq!(dist.claim(SHARES, &holder(name), &mut ledger), Ok(3333));
        }
        assert_eq!(ledger.balance_of(&vault(), CASH), Ok(1));
    }

    #[test]
    fn test_save_load_roundtrip() {
        let (mut ledger, label) = setup(&[("a", 600), ("b", 400)]);
        let a = holder("a");
        let mut dist = distributor();
        dist.deposit(SHARES, &label, 10_000, &mut ledger).unwrap();
        dist.claim(SHARES, &a, &mut ledger).unwrap();

        let bytes = dist.save_state();
        let mut restored = RoyaltyDistributor::load_state(&bytes).unwrap();

        assert_eq!(restored.stream_len(SHARES), 1);
        // Cursor survived: A cannot double-claim after a restore.
        assert_eq!(
            restored.claim(SHARES, &a, &mut ledger),
            Err(RoyaltyError::NoPendingClaims {
                token: SHARES,
                holder: a.clone()
            })
        );
        // B's entitlement survived too.
        assert_eq!(restored.claim(SHARES, &holder("b"), &mut ledger), Ok(4_000));
    }

    #[test]
    fn test_load_garbage_is_none() {
        assert!(RoyaltyDistributor::load_state(b"not bincode").is_none());
    }
}
