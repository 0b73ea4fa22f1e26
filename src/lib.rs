//! Gas and fee statistics for an Ethereum account, sourced from a
//! block-explorer API with an optional fiat conversion.

pub mod api;
pub mod chain;
pub mod cli;
pub mod config;
pub mod etherscan;
pub mod models;
pub mod price;
pub mod stats;
pub mod units;
