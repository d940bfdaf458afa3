//! Refresh pass: fetch, compute and publish the latest snapshot

use crate::config::SignalConfig;
use crate::metrics::Metrics;
use crate::models::{SignalSnapshot, Ticker};
use crate::services::market_data::MarketDataProvider;
use crate::signals::engine::SignalEngine;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tokio::sync::{Mutex, RwLock};
use tracing::{error, info, warn};

/// A refresh pass that did not publish a snapshot
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RefreshError {
    #[error("no tickers configured")]
    NoTickers,
    #[error("a refresh pass is already running")]
    AlreadyRunning,
}

/// Owns the signal engine and the most recent complete snapshot.
///
/// At most one pass runs at a time. The snapshot is replaced only after a
/// pass completes, so readers never see a partial result.
pub struct SignalRefresher {
    engine: SignalEngine,
    provider: Arc<dyn MarketDataProvider>,
    tickers: Vec<Ticker>,
    history_range: String,
    latest: RwLock<Option<Arc<SignalSnapshot>>>,
    pass_guard: Mutex<()>,
    metrics: Option<Arc<Metrics>>,
}

impl SignalRefresher {
    pub fn new(config: &SignalConfig, provider: Arc<dyn MarketDataProvider>) -> Self {
        Self {
            engine: SignalEngine::new(config),
            provider,
            tickers: config.tickers.clone(),
            history_range: config.history_range.clone(),
            latest: RwLock::new(None),
            pass_guard: Mutex::new(()),
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn tickers(&self) -> &[Ticker] {
        &self.tickers
    }

    /// Run one pass over all tickers and publish the result.
    ///
    /// Returns `AlreadyRunning` without doing any work if another pass holds the guard.
    /// On error the previously published snapshot is left untouched.
    pub async fn refresh(&self) -> Result<Arc<SignalSnapshot>, RefreshError> {
        let Ok(_guard) = self.pass_guard.try_lock() else {
            warn!("refresh requested while a pass is running, skipping");
            if let Some(metrics) = &self.metrics {
                metrics.refresh_skipped_total.inc();
            }
            return Err(RefreshError::AlreadyRunning);
        };

        if self.tickers.is_empty() {
            error!("refresh aborted: no tickers configured");
            if let Some(metrics) = &self.metrics {
                metrics.refresh_failures_total.inc();
            }
            return Err(RefreshError::NoTickers);
        }

        let started = Instant::now();
        info!(
            ticker_count = self.tickers.len(),
            range = %self.history_range,
            "fetching stock data for {} tickers",
            self.tickers.len()
        );

        let results = self
            .engine
            .compute_signals(self.provider.as_ref(), &self.tickers, &self.history_range)
            .await;
        let snapshot = Arc::new(SignalSnapshot::new(results));

        let unavailable = snapshot.results.len() - snapshot.available_count();
        if let Some(metrics) = &self.metrics {
            metrics.refresh_runs_total.inc();
            metrics.ticker_fetch_failures_total.inc_by(unavailable as u64);
            metrics
                .refresh_duration_seconds
                .observe(started.elapsed().as_secs_f64());
            metrics
                .last_refresh_timestamp_seconds
                .set(snapshot.generated_at.timestamp() as f64);
        }

        *self.latest.write().await = Some(snapshot.clone());

        info!(
            available = snapshot.available_count(),
            unavailable = unavailable,
            duration_ms = started.elapsed().as_millis() as u64,
            "stock data updated"
        );

        Ok(snapshot)
    }

    /// Most recent complete snapshot, if any pass has finished
    pub async fn latest(&self) -> Option<Arc<SignalSnapshot>> {
        self.latest.read().await.clone()
    }

    pub fn is_refreshing(&self) -> bool {
        self.pass_guard.try_lock().is_err()
    }
}
