//! End-to-end governance flow: dilution request, weighted ballot with a
//! counter-offer, approved mint, then royalty distribution to the enlarged
//! holder set.

use chorus_ballots::BallotEngine;
use chorus_dilution::DilutionController;
use chorus_ledger::{LedgerMutator, LedgerView};
use chorus_nullables::NullLedger;
use chorus_royalties::RoyaltyDistributor;
use chorus_types::{BlockHeight, HolderAddress, ProtocolParams, Ratio, TokenId};

const SHARES: TokenId = TokenId::new(1);
const CASH: TokenId = TokenId::new(2);

fn holder(name: &str) -> HolderAddress {
    HolderAddress::new(format!("chrs_{name}"))
}

fn params() -> ProtocolParams {
    ProtocolParams {
        voting_interval_blocks: 100,
        min_turnout: Ratio::new(1, 10),
        supermajority: Ratio::new(2, 3),
        supply_ceiling: 1_000_000,
        dilution_cooldown_blocks: 500,
        ..ProtocolParams::default()
    }
}

#[test]
fn full_governance_and_royalty_flow() {
    chorus_utils::try_init_tracing();

    let alice = holder("alice");
    let bob = holder("bob");
    let carol = holder("carol");
    let label = holder("label");
    let treasury = holder("treasury");
    let vault = holder("vault");

    let mut ledger = NullLedger::new();
    ledger.register_with_balances(SHARES, &[(&alice, 500_000), (&bob, 300_000), (&carol, 100_000)]);
    ledger.register_with_balances(CASH, &[(&label, 10_000_000)]);

    let mut ballots = BallotEngine::new(params());
    let mut controller = DilutionController::new(treasury.clone(), params());
    let mut royalties = RoyaltyDistributor::new(CASH, vault.clone(), params());

    // ── Dilution: carol asks for 90k new shares ──────────────────────────
    let now = BlockHeight::ZERO;
    let req = controller
        .request_dilution(SHARES, &carol, 90_000, &mut ballots, &ledger, now)
        .unwrap();
    let ballot = controller.request(req).unwrap().ballot;

    // The requester cannot vote; alice backs the mint.
    assert!(ballots.cast_vote(ballot, &carol, true, now).is_err());
    ballots.cast_vote(ballot, &alice, true, now).unwrap();

    // Bob would rather negotiate than vote: he counter-offers, which
    // freezes voting for fresh participants until carol decides.
    ballots.create_counter_offer(ballot, &bob, 2_500, now).unwrap();
    assert!(ballots
        .cast_vote(ballot, &holder("late"), true, now)
        .is_err());

    // Carol accepts: bob is now recorded as supporting the mint and his
    // deposit comes back to him.
    ballots.counter_offer_action(ballot, &carol, true, now).unwrap();
    assert_eq!(ballots.claim_offer_deposit(ballot, &bob), Ok(2_500));

    // Resolution after the deadline: 800k of 900k weight says yes.
    let after = BlockHeight::new(100);
    let approved = controller
        .resolve_dilution(req, &mut ballots, &mut ledger, after)
        .unwrap();
    assert!(approved);
    assert_eq!(ledger.total_supply(SHARES), Ok(990_000));
    assert_eq!(ledger.balance_of(&treasury, SHARES), Ok(90_000));

    // The cooldown now gates the next request for this asset.
    assert!(controller
        .request_dilution(SHARES, &carol, 1_000, &mut ballots, &ledger, BlockHeight::new(200))
        .is_err());

    // ── Royalties: income lands against the enlarged holder set ─────────
    royalties
        .deposit(SHARES, &label, 99_000, &mut ledger)
        .unwrap();

    // Alice sells half her position after the snapshot; her entitlement to
    // the already-deposited income is unaffected.
    ledger.transfer(SHARES, &alice, &bob, 250_000).unwrap();

    let alice_share = royalties.claim(SHARES, &alice, &mut ledger).unwrap();
    assert_eq!(alice_share, 500_000u128 * 99_000 / 990_000);
    assert_eq!(ledger.balance_of(&alice, CASH), Ok(alice_share));

    let bob_share = royalties.claim(SHARES, &bob, &mut ledger).unwrap();
    assert_eq!(bob_share, 300_000u128 * 99_000 / 990_000);

    // A second deposit sees the post-sale balances.
    royalties
        .deposit(SHARES, &label, 99_000, &mut ledger)
        .unwrap();
    let alice_second = royalties.claim(SHARES, &alice, &mut ledger).unwrap();
    assert_eq!(alice_second, 250_000u128 * 99_000 / 990_000);

    // The treasury itself is a holder now and can pull its share.
    let treasury_share = royalties.claim(SHARES, &treasury, &mut ledger).unwrap();
    assert_eq!(treasury_share, 2 * (90_000u128 * 99_000 / 990_000));
}
