//! Market data provider interface

use crate::models::{Bar, PriceSeries, Ticker};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use thiserror::Error;

/// Failure to obtain bars for a ticker
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MarketDataError {
    #[error("network error: {0}")]
    Network(String),
    #[error("request timed out")]
    Timeout,
    #[error("upstream returned HTTP {status}")]
    Http { status: u16 },
    #[error("failed to parse response: {0}")]
    Parse(String),
    #[error("no data for ticker")]
    NotFound,
    #[error("provider error: {0}")]
    Provider(String),
}

impl MarketDataError {
    /// Whether another attempt could plausibly succeed
    pub fn is_transient(&self) -> bool {
        match self {
            MarketDataError::Network(_) | MarketDataError::Timeout => true,
            MarketDataError::Http { status } => *status == 429 || *status >= 500,
            MarketDataError::Parse(_)
            | MarketDataError::NotFound
            | MarketDataError::Provider(_) => false,
        }
    }
}

#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Daily bars for `ticker` over a trailing `range` (e.g. `6mo`), oldest first.
    ///
    /// An empty series is a valid answer.
    async fn get_daily_bars(
        &self,
        ticker: &Ticker,
        range: &str,
    ) -> Result<PriceSeries, MarketDataError>;
}

/// In-memory provider returning canned responses.
///
/// Unknown tickers yield an empty series.
#[derive(Default)]
pub struct StaticMarketDataProvider {
    responses: HashMap<Ticker, Result<Vec<Bar>, MarketDataError>>,
    calls: AtomicUsize,
}

impl StaticMarketDataProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bars(mut self, ticker: impl Into<Ticker>, bars: Vec<Bar>) -> Self {
        self.responses.insert(ticker.into(), Ok(bars));
        self
    }

    pub fn with_error(mut self, ticker: impl Into<Ticker>, error: MarketDataError) -> Self {
        self.responses.insert(ticker.into(), Err(error));
        self
    }

    /// Number of fetches served so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MarketDataProvider for StaticMarketDataProvider {
    async fn get_daily_bars(
        &self,
        ticker: &Ticker,
        _range: &str,
    ) -> Result<PriceSeries, MarketDataError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.responses.get(ticker) {
            Some(Ok(bars)) => Ok(PriceSeries::new(ticker.clone(), bars.clone())),
            Some(Err(e)) => Err(e.clone()),
            None => Ok(PriceSeries::empty(ticker.clone())),
        }
    }
}
