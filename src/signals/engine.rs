//! Per-ticker signal computation

use crate::config::{CrossoverConfig, SignalConfig};
use crate::indicators::price_change::calculate_change_percent;
use crate::indicators::trend::calculate_smas_detailed;
use crate::models::{Metric, PriceSeries, SignalMetrics, SignalOutcome, SignalResult, Ticker};
use crate::services::market_data::MarketDataProvider;
use crate::signals::crossover::crossover_signal;
use tracing::{debug, info, warn};

pub const NO_DATA_REASON: &str = "no price data returned";

pub struct SignalEngine {
    sma_periods: Vec<usize>,
    crossover: CrossoverConfig,
}

impl SignalEngine {
    /// The crossover periods are always computed, even if missing from `sma_periods`.
    ///
    /// `AppConfig` loading already rejects such a config; this only matters for
    /// a `SignalConfig` built by hand.
    pub fn new(config: &SignalConfig) -> Self {
        let mut sma_periods = config.sma_periods.clone();
        for period in [config.crossover.fast_period, config.crossover.slow_period] {
            if !sma_periods.contains(&period) {
                sma_periods.push(period);
            }
        }
        sma_periods.sort_unstable();

        Self {
            sma_periods,
            crossover: config.crossover,
        }
    }

    pub fn sma_periods(&self) -> &[usize] {
        &self.sma_periods
    }

    /// Evaluate metrics from an already fetched series
    pub fn evaluate(&self, series: &PriceSeries) -> SignalOutcome {
        let Some(last) = series.last() else {
            return SignalOutcome::DataNotAvailable {
                reason: NO_DATA_REASON.to_string(),
            };
        };

        let change_percent = match calculate_change_percent(last) {
            Ok(change) => Metric::Present(change),
            Err(e) => {
                warn!(ticker = %series.ticker, error = %e, "change percent unavailable");
                Metric::Unavailable
            }
        };

        let smas: Vec<_> = calculate_smas_detailed(&series.bars, &self.sma_periods)
            .into_iter()
            .map(|(sma, error)| {
                if let Some(e) = error {
                    debug!(
                        ticker = %series.ticker,
                        period = sma.period,
                        error = %e,
                        "SMA unavailable"
                    );
                }
                sma
            })
            .collect();

        let sma_for = |period: usize| {
            smas.iter()
                .find(|s| s.period == period)
                .map(|s| s.value)
                .unwrap_or(Metric::Unavailable)
        };
        let signal = crossover_signal(
            sma_for(self.crossover.fast_period),
            sma_for(self.crossover.slow_period),
        );

        SignalOutcome::Computed(SignalMetrics {
            close: last.close,
            open: last.open,
            change_percent,
            smas,
            signal,
        })
    }

    /// Fetch and evaluate each ticker in order.
    ///
    /// A failing ticker becomes a data-not-available row; the batch always completes.
    pub async fn compute_signals(
        &self,
        provider: &dyn MarketDataProvider,
        tickers: &[Ticker],
        range: &str,
    ) -> Vec<SignalResult> {
        let mut results = Vec::with_capacity(tickers.len());

        for ticker in tickers {
            let outcome = match provider.get_daily_bars(ticker, range).await {
                Ok(series) => {
                    if series.is_empty() {
                        warn!(ticker = %ticker, "no bars returned");
                    }
                    self.evaluate(&series)
                }
                Err(e) => {
                    warn!(ticker = %ticker, error = %e, "failed to fetch bars");
                    SignalOutcome::DataNotAvailable {
                        reason: e.to_string(),
                    }
                }
            };

            if let SignalOutcome::Computed(metrics) = &outcome {
                info!(
                    ticker = %ticker,
                    close = metrics.close,
                    signal = %metrics.signal,
                    "computed signal for {}",
                    ticker
                );
            }

            results.push(SignalResult::with_outcome(ticker.clone(), outcome));
        }

        results
    }
}
