//! Storage-agnostic wagering domain.

pub mod balance;
pub mod bet;
pub mod error;
pub mod id;
pub mod payout;
pub mod poll;

