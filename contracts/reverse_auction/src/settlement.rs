use auction_common::{math::safe_math::SafeMath, validate};
use core::cmp::Ordering;
use soroban_sdk::{contracttype, Address, Env, Vec};

use crate::{
    errors::AuctionError,
    storage::{AuctionConfig, Bid, BidRank, Settlement},
};

/// Cheaper bids rank first, equal amounts keep submission order.
pub fn cmp_rank(a: &BidRank, b: &BidRank) -> Ordering {
    a.amount.cmp(&b.amount).then(a.seq.cmp(&b.seq))
}

/// Inserts `rank` into the standing winners, which stay sorted by
/// [`cmp_rank`] and never exceed `num_winners` entries.
///
/// Returns whether the bid currently holds a winning slot.
pub fn admit_bid(standing: &mut Vec<BidRank>, rank: BidRank, num_winners: u32) -> bool {
    let mut position = standing.len();
    while position > 0
        && cmp_rank(&standing.get_unchecked(position - 1), &rank) == Ordering::Greater
    {
        position -= 1;
    }

    if position >= num_winners {
        return false;
    }

    standing.insert(position, rank);
    while standing.len() > num_winners {
        standing.pop_back();
    }

    true
}

/// What a single bidder collects once the auction has settled.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Disbursement {
    pub recipient: Address,
    pub won: bool,
    /// The bidder's own escrowed bid
    pub deposit: i128,
    /// Clearing price for winners, zero for everyone else
    pub payout: i128,
}

impl Disbursement {
    pub fn total(&self, env: &Env) -> Result<i128, AuctionError> {
        Ok(self.deposit.safe_add(self.payout, env)?)
    }
}

/// Derives the uniform clearing price from the winning bids, cheapest first,
/// and splits the locked pool between the winners and the creator.
///
/// Fails with `InsufficientFunds` when the locked pool cannot cover the
/// clearing price for every winner. Nothing is moved here.
pub fn plan_settlement(
    env: &Env,
    config: &AuctionConfig,
    winning_bids: &Vec<Bid>,
    deposits_held: i128,
) -> Result<Settlement, AuctionError> {
    let winner_count = winning_bids.len();
    let clearing_price = match winner_count {
        0 => 0,
        n => winning_bids.get_unchecked(n - 1).amount,
    };

    let mut winners: Vec<Address> = Vec::new(env);
    for bid in winning_bids.iter() {
        winners.push_back(bid.bidder);
    }

    let total_payout = clearing_price.safe_mul(i128::from(winner_count), env)?;
    validate!(
        env,
        total_payout <= config.locked_funds,
        AuctionError::InsufficientFunds,
        "payout {} exceeds locked funds {}",
        total_payout,
        config.locked_funds
    )?;

    Ok(Settlement {
        clearing_price,
        winners,
        total_payout,
        deposits_returned: deposits_held,
        creator_refund: config.locked_funds.safe_sub(total_payout, env)?,
    })
}

/// Deposit plus, for winners, the clearing price.
pub fn entitlement(settlement: &Settlement, bid: Bid) -> Disbursement {
    let won = settlement.winners.contains(&bid.bidder);
    Disbursement {
        payout: if won { settlement.clearing_price } else { 0 },
        deposit: bid.amount,
        won,
        recipient: bid.bidder,
    }
}
