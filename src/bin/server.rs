//! Optimist.Trader server
//!
//! Serves the stock signal table over HTTP, refreshes it once at startup and
//! then daily on the configured schedule.

use dotenvy::dotenv;
use optimist_trader::config::{get_environment, AppConfig};
use optimist_trader::core::http::{start_server, AppState};
use optimist_trader::core::refresh::SignalRefresher;
use optimist_trader::core::scheduler::RefreshScheduler;
use optimist_trader::logging;
use optimist_trader::metrics::Metrics;
use optimist_trader::render::RenderOptions;
use optimist_trader::services::yahoo::YahooMarketDataProvider;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();

    logging::init_logging();

    let config = AppConfig::from_env()?;
    let port = config.port;

    info!("Starting Optimist.Trader");
    info!(environment = %get_environment(), "Environment");
    info!(port = port, "HTTP Server: http://0.0.0.0:{}", port);
    info!(
        tickers = config.signals.tickers.len(),
        range = %config.signals.history_range,
        sma_periods = ?config.signals.sma_periods,
        "Signal configuration"
    );

    let metrics = Arc::new(Metrics::new()?);
    let provider = Arc::new(YahooMarketDataProvider::new(&config.provider)?);
    let refresher = Arc::new(
        SignalRefresher::new(&config.signals, provider).with_metrics(metrics.clone()),
    );

    // Initial pass runs in the background so the page is served right away
    let initial = refresher.clone();
    tokio::spawn(async move {
        if let Err(e) = initial.refresh().await {
            error!(error = %e, "initial refresh failed");
        }
    });

    let scheduler = RefreshScheduler::from_config(refresher.clone(), &config.schedule)?;
    scheduler.start().await?;
    if let Some(next) = scheduler.next_run() {
        info!(cron = %scheduler.expression(), next_run = %next, "Scheduler started");
    }

    let state = AppState::new(refresher, metrics, RenderOptions::from_config(&config));
    let server_handle = tokio::spawn(async move {
        if let Err(e) = start_server(port, state).await {
            error!(error = %e, "HTTP server error");
        }
    });

    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Shutting down...");
        }
        _ = server_handle => {
            error!("HTTP server stopped");
        }
    }

    scheduler.stop().await;
    info!("Optimist.Trader stopped");

    Ok(())
}
