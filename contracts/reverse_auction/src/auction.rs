use soroban_sdk::{Address, Env};

use crate::{
    errors::AuctionError,
    settlement::Disbursement,
    storage::{AuctionConfig, Bid, Settlement},
};

pub trait ReverseAuctionTrait {
    // ################################################################
    //                             CREATOR
    // ################################################################

    /// Creates the auction and escrows `locked_funds` of `token` from the
    /// creator. Can only be called once.
    fn initialize(
        env: Env,
        creator: Address,
        token: Address,
        num_winners: u32,
        max_bid: i128,
        locked_funds: i128,
    ) -> Result<(), AuctionError>;

    /// Closes the auction at the clearing price of the standing winners and
    /// sends the unused pool back to the creator. Bidders collect their
    /// share with `claim`.
    fn end_auction(env: Env, caller: Address) -> Result<Settlement, AuctionError>;

    // ################################################################
    //                             BIDDER
    // ################################################################

    /// Places a sealed bid, escrowing `amount` from the bidder.
    fn submit_bid(env: Env, bidder: Address, amount: i128) -> Result<(), AuctionError>;

    /// Pays out the bidder's deposit, plus the clearing price if they won.
    /// Available once the auction has ended, a single time per bidder.
    fn claim(env: Env, bidder: Address) -> Result<Disbursement, AuctionError>;

    // ################################################################
    //                             QUERIES
    // ################################################################

    fn num_winners(env: Env) -> Result<u32, AuctionError>;

    fn max_bid(env: Env) -> Result<i128, AuctionError>;

    fn locked_funds(env: Env) -> Result<i128, AuctionError>;

    fn auction_creator(env: Env) -> Result<Address, AuctionError>;

    fn token(env: Env) -> Result<Address, AuctionError>;

    fn auction_ended(env: Env) -> Result<bool, AuctionError>;

    fn bid(env: Env, index: u32) -> Result<Bid, AuctionError>;

    fn bid_count(env: Env) -> u32;

    fn has_bid(env: Env, bidder: Address) -> bool;

    fn has_claimed(env: Env, bidder: Address) -> bool;

    fn query_config(env: Env) -> Result<AuctionConfig, AuctionError>;

    fn query_settlement(env: Env) -> Option<Settlement>;
}
