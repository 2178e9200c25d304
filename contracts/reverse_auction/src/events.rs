use soroban_sdk::{Address, Env, Symbol};

pub struct AuctionEvents {}

impl AuctionEvents {
    /// Emitted when the auction is created and the pool is escrowed
    ///
    /// - topics - `["initialize", creator: Address, token: Address]`
    /// - data - `[num_winners: u32, max_bid: i128, locked_funds: i128]`
    pub fn initialize(
        env: &Env,
        creator: Address,
        token: Address,
        num_winners: u32,
        max_bid: i128,
        locked_funds: i128,
    ) {
        let topics = (Symbol::new(env, "initialize"), creator, token);
        env.events()
            .publish(topics, (num_winners, max_bid, locked_funds));
    }

    /// Emitted when a bid is accepted
    ///
    /// - topics - `["submit_bid", bidder: Address]`
    /// - data - `[seq: u32, amount: i128]`
    pub fn submit_bid(env: &Env, bidder: Address, seq: u32, amount: i128) {
        let topics = (Symbol::new(env, "submit_bid"), bidder);
        env.events().publish(topics, (seq, amount));
    }

    /// Emitted for every winner once the clearing price is paid out
    ///
    /// - topics - `["payout", winner: Address]`
    /// - data - `[clearing_price: i128, deposit: i128]`
    pub fn payout(env: &Env, winner: Address, clearing_price: i128, deposit: i128) {
        let topics = (Symbol::new(env, "payout"), winner);
        env.events().publish(topics, (clearing_price, deposit));
    }

    /// Emitted when a losing deposit or the unused pool is returned
    ///
    /// - topics - `["refund", recipient: Address]`
    /// - data - amount: i128
    pub fn refund(env: &Env, recipient: Address, amount: i128) {
        let topics = (Symbol::new(env, "refund"), recipient);
        env.events().publish(topics, amount);
    }

    /// Emitted last, after every transfer of the settlement went through
    ///
    /// - topics - `["auction_ended", creator: Address]`
    /// - data - `[clearing_price: i128, winner_count: u32, creator_refund: i128]`
    pub fn auction_ended(
        env: &Env,
        creator: Address,
        clearing_price: i128,
        winner_count: u32,
        creator_refund: i128,
    ) {
        let topics = (Symbol::new(env, "auction_ended"), creator);
        env.events()
            .publish(topics, (clearing_price, winner_count, creator_refund));
    }
}
