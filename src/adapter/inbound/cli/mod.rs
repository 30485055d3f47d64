//! CLI module graph.

pub mod audit;
pub mod balance;
pub mod bet;
pub mod bets;
pub mod command;
pub mod config;
pub mod output;
pub mod poll;
pub mod render;
pub mod resolve;
pub mod run;
