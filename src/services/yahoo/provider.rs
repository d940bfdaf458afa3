//! Yahoo Finance market data provider implementation

use super::client::YahooRestClient;
use crate::config::ProviderConfig;
use crate::models::{PriceSeries, Ticker};
use crate::services::market_data::{MarketDataError, MarketDataProvider};
use async_trait::async_trait;
use backon::{ExponentialBuilder, Retryable};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

const DAILY_INTERVAL: &str = "1d";

pub struct YahooMarketDataProvider {
    client: Arc<YahooRestClient>,
    retries: usize,
    min_backoff: Duration,
}

impl YahooMarketDataProvider {
    pub fn new(config: &ProviderConfig) -> Result<Self, MarketDataError> {
        let client = YahooRestClient::new(config.base_url.clone(), config.timeout)?;
        Ok(Self::with_client(Arc::new(client)).with_retries(config.retries))
    }

    pub fn with_client(client: Arc<YahooRestClient>) -> Self {
        Self {
            client,
            retries: 0,
            min_backoff: Duration::from_millis(500),
        }
    }

    /// Extra attempts for transient failures (network, timeout, 429/5xx)
    pub fn with_retries(mut self, retries: usize) -> Self {
        self.retries = retries;
        self
    }

    pub fn with_min_backoff(mut self, min_backoff: Duration) -> Self {
        self.min_backoff = min_backoff;
        self
    }

    pub fn client(&self) -> &Arc<YahooRestClient> {
        &self.client
    }
}

#[async_trait]
impl MarketDataProvider for YahooMarketDataProvider {
    async fn get_daily_bars(
        &self,
        ticker: &Ticker,
        range: &str,
    ) -> Result<PriceSeries, MarketDataError> {
        let client = &self.client;
        let symbol = ticker.as_str();

        let response = (move || async move { client.fetch_chart(symbol, range, DAILY_INTERVAL).await })
            .retry(
                ExponentialBuilder::default()
                    .with_min_delay(self.min_backoff)
                    .with_max_times(self.retries),
            )
            .when(|e: &MarketDataError| e.is_transient())
            .notify(|e: &MarketDataError, delay: Duration| {
                warn!(
                    ticker = %symbol,
                    error = %e,
                    delay_ms = delay.as_millis() as u64,
                    "Yahoo: transient failure, retrying"
                );
            })
            .await?;

        if let Some(error) = response.chart.error {
            return Err(if error.is_not_found() {
                MarketDataError::NotFound
            } else {
                MarketDataError::Provider(format!("{}: {}", error.code, error.description))
            });
        }

        let result = response
            .chart
            .result
            .and_then(|results| results.into_iter().next())
            .ok_or(MarketDataError::NotFound)?;

        let bars = result.into_bars();
        debug!(ticker = %symbol, count = bars.len(), "Yahoo: received {} daily bars", bars.len());

        Ok(PriceSeries::new(ticker.clone(), bars))
    }
}
