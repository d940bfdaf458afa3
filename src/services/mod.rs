//! External data sources

pub mod market_data;
pub mod yahoo;

pub use market_data::{MarketDataError, MarketDataProvider, StaticMarketDataProvider};
