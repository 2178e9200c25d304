extern crate std;

use auction_common::constants::MAX_BIDS_PER_AUCTION;
use pretty_assertions::assert_eq;
use soroban_sdk::{
    testutils::{Address as _, Events},
    vec, Address, Env, IntoVal, Symbol,
};

use super::setup::{setup_auction, setup_default_auction, ONE_HUNDREDTH, ONE_TENTH};
use crate::{
    errors::AuctionError,
    storage::{DataKey, Settlement},
};

#[test]
fn two_winners_are_paid_the_higher_bid() {
    let env = Env::default();
    let setup = setup_default_auction(&env);
    let cheap = setup.place_bid(&env, 5 * ONE_HUNDREDTH);
    let dear = setup.place_bid(&env, 7 * ONE_HUNDREDTH);

    let settlement = setup.auction.end_auction(&setup.creator);

    assert_eq!(
        settlement,
        Settlement {
            clearing_price: 7 * ONE_HUNDREDTH,
            winners: vec![&env, cheap.clone(), dear.clone()],
            total_payout: 14 * ONE_HUNDREDTH,
            deposits_returned: 12 * ONE_HUNDREDTH,
            creator_refund: 6 * ONE_HUNDREDTH,
        }
    );
    assert!(setup.auction.auction_ended());
    assert_eq!(setup.auction.query_settlement(), Some(settlement));
    assert_eq!(setup.token.balance(&setup.creator), 6 * ONE_HUNDREDTH);
    assert_eq!(
        setup.token.balance(&setup.auction.address),
        26 * ONE_HUNDREDTH
    );

    setup.auction.claim(&cheap);
    setup.auction.claim(&dear);

    // deposit back plus the clearing price
    assert_eq!(setup.token.balance(&cheap), 12 * ONE_HUNDREDTH);
    assert_eq!(setup.token.balance(&dear), 14 * ONE_HUNDREDTH);
    assert_eq!(setup.token.balance(&setup.auction.address), 0);
}

#[test]
fn settlement_record_is_kept_out_of_instance_storage() {
    let env = Env::default();
    let setup = setup_default_auction(&env);
    setup.place_bid(&env, 5 * ONE_HUNDREDTH);
    setup.auction.end_auction(&setup.creator);

    env.as_contract(&setup.auction.address, || {
        assert!(env.storage().persistent().has(&DataKey::Settlement));
        assert!(!env.storage().instance().has(&DataKey::Settlement));
    });
}

#[test]
fn bids_out_of_order_clear_at_the_highest_winner() {
    let env = Env::default();
    let setup = setup_default_auction(&env);
    let first = setup.place_bid(&env, 5 * ONE_HUNDREDTH);
    let second = setup.place_bid(&env, 4 * ONE_HUNDREDTH);

    let settlement = setup.auction.end_auction(&setup.creator);

    assert_eq!(settlement.clearing_price, 5 * ONE_HUNDREDTH);
    assert_eq!(settlement.winners, vec![&env, second.clone(), first.clone()]);
    assert_eq!(settlement.creator_refund, ONE_TENTH);
    assert_eq!(setup.token.balance(&setup.creator), ONE_TENTH);

    setup.auction.claim(&first);
    setup.auction.claim(&second);

    assert_eq!(setup.token.balance(&first), ONE_TENTH);
    assert_eq!(setup.token.balance(&second), 9 * ONE_HUNDREDTH);
}

#[test]
fn losers_get_their_deposit_back() {
    let env = Env::default();
    let setup = setup_default_auction(&env);
    let a = setup.place_bid(&env, 3 * ONE_HUNDREDTH);
    let b = setup.place_bid(&env, 6 * ONE_HUNDREDTH);
    let c = setup.place_bid(&env, 6 * ONE_HUNDREDTH);
    let d = setup.place_bid(&env, 9 * ONE_HUNDREDTH);

    let settlement = setup.auction.end_auction(&setup.creator);

    // the earlier of the two tied bids takes the last slot
    assert_eq!(settlement.winners, vec![&env, a.clone(), b.clone()]);
    assert_eq!(settlement.clearing_price, 6 * ONE_HUNDREDTH);
    assert_eq!(settlement.deposits_returned, 24 * ONE_HUNDREDTH);
    assert_eq!(settlement.creator_refund, 8 * ONE_HUNDREDTH);

    for bidder in [&a, &b, &c, &d] {
        setup.auction.claim(bidder);
    }

    assert_eq!(setup.token.balance(&a), 9 * ONE_HUNDREDTH);
    assert_eq!(setup.token.balance(&b), 12 * ONE_HUNDREDTH);
    assert_eq!(setup.token.balance(&c), 6 * ONE_HUNDREDTH);
    assert_eq!(setup.token.balance(&d), 9 * ONE_HUNDREDTH);
    assert_eq!(setup.token.balance(&setup.creator), 8 * ONE_HUNDREDTH);
    assert_eq!(setup.token.balance(&setup.auction.address), 0);
}

#[test]
fn fewer_bids_than_winner_slots() {
    let env = Env::default();
    let setup = setup_auction(&env, 3, ONE_TENTH, 3 * ONE_TENTH);
    let only = setup.place_bid(&env, 8 * ONE_HUNDREDTH);

    let settlement = setup.auction.end_auction(&setup.creator);

    assert_eq!(settlement.winners, vec![&env, only.clone()]);
    assert_eq!(settlement.clearing_price, 8 * ONE_HUNDREDTH);
    assert_eq!(settlement.total_payout, 8 * ONE_HUNDREDTH);
    assert_eq!(settlement.creator_refund, 22 * ONE_HUNDREDTH);
    assert_eq!(setup.token.balance(&setup.creator), 22 * ONE_HUNDREDTH);

    setup.auction.claim(&only);
    assert_eq!(setup.token.balance(&only), 16 * ONE_HUNDREDTH);
}

#[test]
fn no_bids_returns_the_whole_pool() {
    let env = Env::default();
    let setup = setup_default_auction(&env);

    let settlement = setup.auction.end_auction(&setup.creator);

    assert_eq!(
        settlement,
        Settlement {
            clearing_price: 0,
            winners: vec![&env],
            total_payout: 0,
            deposits_returned: 0,
            creator_refund: 2 * ONE_TENTH,
        }
    );
    assert_eq!(setup.token.balance(&setup.creator), 2 * ONE_TENTH);
    assert_eq!(setup.token.balance(&setup.auction.address), 0);
}

#[test]
fn ending_twice_is_not_allowed() {
    let env = Env::default();
    let setup = setup_default_auction(&env);
    setup.place_bid(&env, 5 * ONE_HUNDREDTH);
    setup.auction.end_auction(&setup.creator);

    assert_eq!(
        setup.auction.try_end_auction(&setup.creator),
        Err(Ok(AuctionError::AuctionAlreadyEnded))
    );
    assert_eq!(setup.token.balance(&setup.creator), 15 * ONE_HUNDREDTH);
}

#[test]
fn only_the_creator_can_end_the_auction() {
    let env = Env::default();
    let setup = setup_default_auction(&env);
    let bidder = setup.place_bid(&env, 5 * ONE_HUNDREDTH);
    let stranger = Address::generate(&env);

    assert_eq!(
        setup.auction.try_end_auction(&stranger),
        Err(Ok(AuctionError::Unauthorized))
    );
    assert_eq!(
        setup.auction.try_end_auction(&bidder),
        Err(Ok(AuctionError::Unauthorized))
    );
    assert!(!setup.auction.auction_ended());

    setup.auction.end_auction(&setup.creator);

    // authorization is checked before the terminal state
    assert_eq!(
        setup.auction.try_end_auction(&stranger),
        Err(Ok(AuctionError::Unauthorized))
    );
}

#[test]
fn underfunded_pool_keeps_the_auction_open() {
    let env = Env::default();
    let setup = setup_auction(&env, 2, ONE_TENTH, ONE_TENTH);
    let a = setup.place_bid(&env, 6 * ONE_HUNDREDTH);
    let b = setup.place_bid(&env, 7 * ONE_HUNDREDTH);

    assert_eq!(
        setup.auction.try_end_auction(&setup.creator),
        Err(Ok(AuctionError::InsufficientFunds))
    );

    assert!(!setup.auction.auction_ended());
    assert_eq!(setup.auction.query_settlement(), None);
    assert_eq!(setup.token.balance(&a), 0);
    assert_eq!(setup.token.balance(&b), 0);
    assert_eq!(setup.token.balance(&setup.creator), 0);
    assert_eq!(
        setup.token.balance(&setup.auction.address),
        ONE_TENTH + 13 * ONE_HUNDREDTH
    );

    setup.place_bid(&env, ONE_HUNDREDTH);
    assert_eq!(setup.auction.bid_count(), 3);
}

#[test]
fn settlement_is_published_last() {
    let env = Env::default();
    let setup = setup_default_auction(&env);
    setup.place_bid(&env, 5 * ONE_HUNDREDTH);
    setup.place_bid(&env, 7 * ONE_HUNDREDTH);

    setup.auction.end_auction(&setup.creator);

    let (contract, topics, data) = env.events().all().last().unwrap();
    let name: Symbol = topics.get_unchecked(0).into_val(&env);
    let creator: Address = topics.get_unchecked(1).into_val(&env);
    let summary: (i128, u32, i128) = data.into_val(&env);

    assert_eq!(contract, setup.auction.address);
    assert_eq!(name, Symbol::new(&env, "auction_ended"));
    assert_eq!(creator, setup.creator);
    assert_eq!(summary, (7 * ONE_HUNDREDTH, 2, 6 * ONE_HUNDREDTH));
}

#[test]
fn zero_bids_settle_without_transfers() {
    let env = Env::default();
    let setup = setup_auction(&env, 1, ONE_TENTH, ONE_TENTH);
    let a = setup.bidder(&env, 0);
    let b = setup.bidder(&env, 0);
    setup.auction.submit_bid(&a, &0);
    setup.auction.submit_bid(&b, &0);

    let settlement = setup.auction.end_auction(&setup.creator);

    assert_eq!(settlement.winners, vec![&env, a.clone()]);
    assert_eq!(settlement.clearing_price, 0);
    assert_eq!(settlement.creator_refund, ONE_TENTH);
    assert_eq!(setup.token.balance(&setup.creator), ONE_TENTH);

    assert_eq!(setup.auction.claim(&a).payout, 0);
    assert_eq!(setup.auction.claim(&b).deposit, 0);
    assert_eq!(setup.token.balance(&a), 0);
    assert_eq!(setup.token.balance(&b), 0);
}

#[test]
fn frozen_bidder_does_not_block_settlement() {
    let env = Env::default();
    let setup = setup_default_auction(&env);
    let a = setup.place_bid(&env, 5 * ONE_HUNDREDTH);
    let b = setup.place_bid(&env, 6 * ONE_HUNDREDTH);
    let loser = setup.place_bid(&env, 9 * ONE_HUNDREDTH);

    setup.deauthorize(&loser);

    let settlement = setup.auction.end_auction(&setup.creator);

    assert!(setup.auction.auction_ended());
    assert_eq!(settlement.clearing_price, 6 * ONE_HUNDREDTH);
    assert_eq!(setup.token.balance(&setup.creator), 8 * ONE_HUNDREDTH);

    setup.auction.claim(&a);
    setup.auction.claim(&b);
    assert_eq!(setup.token.balance(&a), 11 * ONE_HUNDREDTH);
    assert_eq!(setup.token.balance(&b), 12 * ONE_HUNDREDTH);

    // the frozen deposit stays claimable
    assert!(setup.auction.try_claim(&loser).is_err());
    assert!(!setup.auction.has_claimed(&loser));
    assert_eq!(
        setup.token.balance(&setup.auction.address),
        9 * ONE_HUNDREDTH
    );
}

#[test]
fn full_ledger_settles_within_budget() {
    let env = Env::default();
    let setup = setup_auction(&env, 10, ONE_TENTH, 10 * ONE_TENTH);

    let mut bidders = std::vec::Vec::new();
    for i in 0..MAX_BIDS_PER_AUCTION {
        bidders.push(setup.place_bid(&env, ONE_TENTH - i128::from(i) * 1_000));
    }
    assert_eq!(setup.auction.bid_count(), MAX_BIDS_PER_AUCTION);

    let late = setup.bidder(&env, ONE_HUNDREDTH);
    assert_eq!(
        setup.auction.try_submit_bid(&late, &ONE_HUNDREDTH),
        Err(Ok(AuctionError::TooManyBids))
    );

    env.cost_estimate().budget().reset_default();
    let settlement = setup.auction.end_auction(&setup.creator);

    // the last ten bids were the cheapest
    let cheapest = ONE_TENTH - 199_000;
    let clearing_price = ONE_TENTH - 190_000;
    assert_eq!(settlement.winners.len(), 10);
    assert_eq!(settlement.winners.get_unchecked(0), bidders[199]);
    assert_eq!(settlement.clearing_price, clearing_price);
    assert_eq!(settlement.creator_refund, 10 * ONE_TENTH - 10 * clearing_price);

    setup.auction.claim(&bidders[199]);
    setup.auction.claim(&bidders[0]);
    assert_eq!(
        setup.token.balance(&bidders[199]),
        cheapest + clearing_price
    );
    assert_eq!(setup.token.balance(&bidders[0]), ONE_TENTH);
}
