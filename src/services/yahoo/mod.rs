//! Yahoo Finance integration

pub mod client;
pub mod provider;
pub mod response;

pub use client::YahooRestClient;
pub use provider::YahooMarketDataProvider;
