use auction_common::error::ErrorCode;
use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum AuctionError {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    #[doc = "num_winners is zero or an amount is negative"]
    InvalidConfig = 3,
    AuctionClosed = 4,
    BidTooHigh = 5,
    DuplicateBid = 6,
    Unauthorized = 7,
    AuctionAlreadyEnded = 8,
    #[doc = "clearing price times winner count exceeds the locked funds"]
    InsufficientFunds = 9,
    InvalidBidAmount = 10,
    BidNotFound = 11,
    MathOverflow = 12,
    SettlementInProgress = 13,
    TooManyBids = 14,
    AuctionNotEnded = 15,
    AlreadyClaimed = 16,
}

impl From<ErrorCode> for AuctionError {
    fn from(error: ErrorCode) -> Self {
        match error {
            ErrorCode::MathError => AuctionError::MathOverflow,
        }
    }
}
