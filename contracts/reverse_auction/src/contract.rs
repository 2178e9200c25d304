use auction_common::{
    constants::MAX_BIDS_PER_AUCTION, math::safe_math::SafeMath, safe_increment, validate,
};
use soroban_sdk::{contract, contractimpl, contractmeta, log, Address, Env, Vec};

use crate::{
    auction::ReverseAuctionTrait,
    errors::AuctionError,
    events::AuctionEvents,
    settlement::{admit_bid, entitlement, plan_settlement, Disbursement},
    storage::{
        self, get_bid, get_bid_count, get_bid_seq, get_config, get_deposits_held,
        get_settlement, get_standing, get_state, is_claimed, is_initialized, is_settling,
        mark_claimed, save_bid, save_config, save_settlement, save_standing, save_state,
        set_settling, utils, AuctionConfig, AuctionState, Bid, BidRank, Settlement,
    },
};

contractmeta!(
    key = "Description",
    val = "Sealed-bid reverse auction settled at a uniform clearing price"
);

#[contract]
pub struct ReverseAuction;

#[contractimpl]
impl ReverseAuctionTrait for ReverseAuction {
    fn initialize(
        env: Env,
        creator: Address,
        token: Address,
        num_winners: u32,
        max_bid: i128,
        locked_funds: i128,
    ) -> Result<(), AuctionError> {
        creator.require_auth();

        if is_initialized(&env) {
            log!(&env, "Reverse Auction: Initialize: initializing contract twice is not allowed");
            return Err(AuctionError::AlreadyInitialized);
        }

        validate!(
            &env,
            num_winners >= 1,
            AuctionError::InvalidConfig,
            "Reverse Auction: Initialize: at least one winner is required"
        )?;
        validate!(
            &env,
            num_winners <= MAX_BIDS_PER_AUCTION,
            AuctionError::InvalidConfig,
            "Reverse Auction: Initialize: at most {} winners are allowed",
            MAX_BIDS_PER_AUCTION
        )?;
        validate!(
            &env,
            max_bid >= 0 && locked_funds >= 0,
            AuctionError::InvalidConfig,
            "Reverse Auction: Initialize: amounts must not be negative"
        )?;

        save_config(
            &env,
            &AuctionConfig {
                creator: creator.clone(),
                token: token.clone(),
                num_winners,
                max_bid,
                locked_funds,
            },
        );
        save_state(&env, AuctionState::Open);
        set_settling(&env, false);

        utils::transfer_token(
            &env,
            &token,
            &creator,
            &env.current_contract_address(),
            locked_funds,
        );

        AuctionEvents::initialize(&env, creator, token, num_winners, max_bid, locked_funds);

        Ok(())
    }

    fn end_auction(env: Env, caller: Address) -> Result<Settlement, AuctionError> {
        caller.require_auth();

        let config = get_config(&env)?;
        ensure_not_settling(&env)?;

        validate!(
            &env,
            caller == config.creator,
            AuctionError::Unauthorized,
            "Reverse Auction: End Auction: only the creator can end the auction"
        )?;
        validate!(
            &env,
            get_state(&env) == AuctionState::Open,
            AuctionError::AuctionAlreadyEnded,
            "Reverse Auction: End Auction: auction has already ended"
        )?;

        let mut winning_bids: Vec<Bid> = Vec::new(&env);
        for rank in get_standing(&env).iter() {
            winning_bids.push_back(get_bid(&env, rank.seq)?);
        }
        let settlement =
            plan_settlement(&env, &config, &winning_bids, get_deposits_held(&env))?;

        // Commit the terminal state before any value leaves the contract
        save_state(&env, AuctionState::Ended);
        save_settlement(&env, &settlement);
        set_settling(&env, true);

        utils::transfer_token(
            &env,
            &config.token,
            &env.current_contract_address(),
            &config.creator,
            settlement.creator_refund,
        );
        AuctionEvents::refund(&env, config.creator.clone(), settlement.creator_refund);

        set_settling(&env, false);

        AuctionEvents::auction_ended(
            &env,
            config.creator,
            settlement.clearing_price,
            settlement.winners.len(),
            settlement.creator_refund,
        );

        Ok(settlement)
    }

    fn submit_bid(env: Env, bidder: Address, amount: i128) -> Result<(), AuctionError> {
        bidder.require_auth();

        let config = get_config(&env)?;
        ensure_not_settling(&env)?;

        validate!(
            &env,
            get_state(&env) == AuctionState::Open,
            AuctionError::AuctionClosed,
            "Reverse Auction: Submit Bid: auction has ended"
        )?;
        validate!(
            &env,
            amount >= 0,
            AuctionError::InvalidBidAmount,
            "Reverse Auction: Submit Bid: negative bid {}",
            amount
        )?;
        validate!(
            &env,
            amount <= config.max_bid,
            AuctionError::BidTooHigh,
            "Reverse Auction: Submit Bid: bid {} exceeds maximum allowed value {}",
            amount,
            config.max_bid
        )?;
        validate!(
            &env,
            !storage::has_bid(&env, &bidder),
            AuctionError::DuplicateBid,
            "Reverse Auction: Submit Bid: you can only bid once"
        )?;

        let seq = get_bid_count(&env);
        validate!(
            &env,
            seq < MAX_BIDS_PER_AUCTION,
            AuctionError::TooManyBids,
            "Reverse Auction: Submit Bid: auction is full at {} bids",
            MAX_BIDS_PER_AUCTION
        )?;

        let mut deposits_held = get_deposits_held(&env);
        safe_increment!(&env, deposits_held, amount);
        save_bid(
            &env,
            seq,
            &Bid {
                bidder: bidder.clone(),
                amount,
            },
            seq.safe_add(1, &env)?,
            deposits_held,
        );

        let mut standing = get_standing(&env);
        if admit_bid(&mut standing, BidRank { amount, seq }, config.num_winners) {
            save_standing(&env, &standing);
        }

        utils::transfer_token(
            &env,
            &config.token,
            &bidder,
            &env.current_contract_address(),
            amount,
        );

        AuctionEvents::submit_bid(&env, bidder, seq, amount);

        Ok(())
    }

    fn claim(env: Env, bidder: Address) -> Result<Disbursement, AuctionError> {
        bidder.require_auth();

        let config = get_config(&env)?;
        ensure_not_settling(&env)?;

        validate!(
            &env,
            get_state(&env) == AuctionState::Ended,
            AuctionError::AuctionNotEnded,
            "Reverse Auction: Claim: auction is still open"
        )?;
        let seq = get_bid_seq(&env, &bidder).ok_or(AuctionError::BidNotFound)?;
        validate!(
            &env,
            !is_claimed(&env, &bidder),
            AuctionError::AlreadyClaimed,
            "Reverse Auction: Claim: already claimed"
        )?;

        let settlement = get_settlement(&env).ok_or(AuctionError::AuctionNotEnded)?;
        let disbursement = entitlement(&settlement, get_bid(&env, seq)?);

        mark_claimed(&env, &bidder);

        utils::transfer_token(
            &env,
            &config.token,
            &env.current_contract_address(),
            &bidder,
            disbursement.total(&env)?,
        );

        if disbursement.won {
            AuctionEvents::payout(&env, bidder, disbursement.payout, disbursement.deposit);
        } else {
            AuctionEvents::refund(&env, bidder, disbursement.deposit);
        }

        Ok(disbursement)
    }

    // Queries

    fn num_winners(env: Env) -> Result<u32, AuctionError> {
        Ok(get_config(&env)?.num_winners)
    }

    fn max_bid(env: Env) -> Result<i128, AuctionError> {
        Ok(get_config(&env)?.max_bid)
    }

    fn locked_funds(env: Env) -> Result<i128, AuctionError> {
        Ok(get_config(&env)?.locked_funds)
    }

    fn auction_creator(env: Env) -> Result<Address, AuctionError> {
        Ok(get_config(&env)?.creator)
    }

    fn token(env: Env) -> Result<Address, AuctionError> {
        Ok(get_config(&env)?.token)
    }

    fn auction_ended(env: Env) -> Result<bool, AuctionError> {
        get_config(&env)?;
        Ok(get_state(&env) == AuctionState::Ended)
    }

    fn bid(env: Env, index: u32) -> Result<Bid, AuctionError> {
        get_bid(&env, index)
    }

    fn bid_count(env: Env) -> u32 {
        get_bid_count(&env)
    }

    fn has_bid(env: Env, bidder: Address) -> bool {
        storage::has_bid(&env, &bidder)
    }

    fn has_claimed(env: Env, bidder: Address) -> bool {
        is_claimed(&env, &bidder)
    }

    fn query_config(env: Env) -> Result<AuctionConfig, AuctionError> {
        get_config(&env)
    }

    fn query_settlement(env: Env) -> Option<Settlement> {
        get_settlement(&env)
    }
}

fn ensure_not_settling(env: &Env) -> Result<(), AuctionError> {
    validate!(
        env,
        !is_settling(env),
        AuctionError::SettlementInProgress,
        "Reverse Auction: settlement in progress"
    )
}
