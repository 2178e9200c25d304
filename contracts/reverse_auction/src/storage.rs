use auction_common::constants::{
    INSTANCE_BUMP_AMOUNT, INSTANCE_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT,
    PERSISTENT_LIFETIME_THRESHOLD,
};
use soroban_sdk::{contracttype, Address, Env, Vec};

use crate::errors::AuctionError;

#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    Config,
    State,
    Settling,
    BidCount,
    DepositsHeld,
    Bid(u32),
    BidSeq(Address),
    Standing,
    Settlement,
    Claimed(Address),
}

// ################################################################
//                             Config
// ################################################################

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AuctionConfig {
    /// Account that escrowed the pool and receives the unused remainder
    pub creator: Address,
    /// Token the pool, bids and payouts are denominated in
    pub token: Address,
    pub num_winners: u32,
    /// Highest accepted bid, inclusive
    pub max_bid: i128,
    /// Amount escrowed by the creator on initialize
    pub locked_funds: i128,
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn save_config(env: &Env, config: &AuctionConfig) {
    env.storage().instance().set(&DataKey::Config, config);
    bump_instance(env);
}

pub fn get_config(env: &Env) -> Result<AuctionConfig, AuctionError> {
    let config = env
        .storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(AuctionError::NotInitialized)?;
    bump_instance(env);

    Ok(config)
}

// ################################################################
//                             State
// ################################################################

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum AuctionState {
    Open = 0,
    Ended = 1,
}

pub fn save_state(env: &Env, state: AuctionState) {
    env.storage().instance().set(&DataKey::State, &state);
}

pub fn get_state(env: &Env) -> AuctionState {
    env.storage()
        .instance()
        .get(&DataKey::State)
        .unwrap_or(AuctionState::Open)
}

pub fn is_settling(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::Settling)
        .unwrap_or(false)
}

pub fn set_settling(env: &Env, settling: bool) {
    env.storage().instance().set(&DataKey::Settling, &settling);
}

// ################################################################
//                              Bids
// ################################################################

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Bid {
    pub bidder: Address,
    pub amount: i128,
}

/// Sort key of a ledger entry.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BidRank {
    pub amount: i128,
    /// Index in the bid ledger
    pub seq: u32,
}

pub fn get_bid_count(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&DataKey::BidCount)
        .unwrap_or(0)
}

pub fn get_deposits_held(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::DepositsHeld)
        .unwrap_or(0)
}

pub fn get_bid(env: &Env, seq: u32) -> Result<Bid, AuctionError> {
    let key = DataKey::Bid(seq);
    let bid = env
        .storage()
        .persistent()
        .get(&key)
        .ok_or(AuctionError::BidNotFound)?;
    bump_persistent(env, &key);

    Ok(bid)
}

/// Appends `bid` at `seq` and records the new ledger totals.
pub fn save_bid(env: &Env, seq: u32, bid: &Bid, bid_count: u32, deposits_held: i128) {
    let key = DataKey::Bid(seq);
    env.storage().persistent().set(&key, bid);
    bump_persistent(env, &key);

    let seq_key = DataKey::BidSeq(bid.bidder.clone());
    env.storage().persistent().set(&seq_key, &seq);
    bump_persistent(env, &seq_key);

    env.storage().instance().set(&DataKey::BidCount, &bid_count);
    env.storage()
        .instance()
        .set(&DataKey::DepositsHeld, &deposits_held);
}

pub fn get_bid_seq(env: &Env, bidder: &Address) -> Option<u32> {
    let key = DataKey::BidSeq(bidder.clone());
    let seq = env.storage().persistent().get(&key);
    if seq.is_some() {
        bump_persistent(env, &key);
    }

    seq
}

pub fn has_bid(env: &Env, bidder: &Address) -> bool {
    get_bid_seq(env, bidder).is_some()
}

/// Cheapest bids so far, at most `num_winners` of them, best first.
pub fn get_standing(env: &Env) -> Vec<BidRank> {
    let standing = env
        .storage()
        .persistent()
        .get(&DataKey::Standing)
        .unwrap_or_else(|| Vec::new(env));
    if env.storage().persistent().has(&DataKey::Standing) {
        bump_persistent(env, &DataKey::Standing);
    }

    standing
}

pub fn save_standing(env: &Env, standing: &Vec<BidRank>) {
    env.storage().persistent().set(&DataKey::Standing, standing);
    bump_persistent(env, &DataKey::Standing);
}

// ################################################################
//                           Settlement
// ################################################################

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Settlement {
    /// Uniform price paid to every winner, the highest accepted bid
    pub clearing_price: i128,
    /// Winning bidders, cheapest first
    pub winners: Vec<Address>,
    /// clearing_price * winners.len()
    pub total_payout: i128,
    /// Sum of all bid deposits owed back to their bidders
    pub deposits_returned: i128,
    /// Remainder of the locked funds returned to the creator
    pub creator_refund: i128,
}

pub fn save_settlement(env: &Env, settlement: &Settlement) {
    env.storage()
        .persistent()
        .set(&DataKey::Settlement, settlement);
    bump_persistent(env, &DataKey::Settlement);
}

pub fn get_settlement(env: &Env) -> Option<Settlement> {
    let settlement = env.storage().persistent().get(&DataKey::Settlement);
    if settlement.is_some() {
        bump_persistent(env, &DataKey::Settlement);
    }

    settlement
}

pub fn is_claimed(env: &Env, bidder: &Address) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Claimed(bidder.clone()))
}

pub fn mark_claimed(env: &Env, bidder: &Address) {
    let key = DataKey::Claimed(bidder.clone());
    env.storage().persistent().set(&key, &true);
    bump_persistent(env, &key);
}

// ################################################################
//                             Utils
// ################################################################

pub fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

pub mod utils {
    use soroban_sdk::token;

    use super::*;

    /// Moves `amount` of `token` between two addresses. Zero amounts are skipped.
    pub fn transfer_token(env: &Env, token: &Address, from: &Address, to: &Address, amount: i128) {
        if amount == 0 {
            return;
        }
        let token_client = token::Client::new(env, token);
        token_client.transfer(from, to, &amount);
    }
}
