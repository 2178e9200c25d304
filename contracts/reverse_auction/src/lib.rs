#![no_std]

mod auction;
mod contract;
pub mod errors;
mod events;
pub mod settlement;
pub mod storage;

pub use crate::contract::{ReverseAuction, ReverseAuctionClient};
