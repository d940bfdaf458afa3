use std::sync::Arc;
use std::time::Duration;

use axum_test::TestServer;
use chrono::NaiveDate;
use optimist_trader::config::SignalConfig;
use optimist_trader::core::http::{create_router, AppState};
use optimist_trader::core::refresh::SignalRefresher;
use optimist_trader::metrics::Metrics;
use optimist_trader::models::{Bar, Ticker};
use optimist_trader::render::RenderOptions;
use optimist_trader::services::yahoo::{YahooMarketDataProvider, YahooRestClient};
use optimist_trader::services::{MarketDataError, MarketDataProvider, StaticMarketDataProvider};
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// 2024-06-03 09:15 IST
pub const FIRST_SESSION_TS: i64 = 1_717_386_300;
pub const IST_OFFSET_SECONDS: i64 = 19_800;
pub const DAY_SECONDS: i64 = 86_400;

/// HTTP server wired to a refresher over the given provider.
#[allow(dead_code)]
pub struct TestApiServer {
    pub server: TestServer,
    pub metrics: Arc<Metrics>,
    pub refresher: Arc<SignalRefresher>,
}

impl TestApiServer {
    /// Two tickers: one with a full year of rising closes, one failing upstream.
    pub async fn new() -> Self {
        let provider = StaticMarketDataProvider::new()
            .with_bars("AAA.NS", rising_bars(250))
            .with_error("BBB.NS", MarketDataError::Http { status: 503 });
        Self::with_provider(Arc::new(provider), &["AAA.NS", "BBB.NS"])
    }

    pub fn with_provider(provider: Arc<dyn MarketDataProvider>, tickers: &[&str]) -> Self {
        let config = SignalConfig {
            tickers: tickers.iter().map(|t| Ticker::new(*t)).collect(),
            ..SignalConfig::default()
        };

        let metrics = Arc::new(Metrics::new().expect("metrics initialization"));
        let refresher =
            Arc::new(SignalRefresher::new(&config, provider).with_metrics(metrics.clone()));
        let state = AppState::new(refresher.clone(), metrics.clone(), RenderOptions::default());

        let server = TestServer::new(create_router(state)).expect("start test server");

        Self {
            server,
            metrics,
            refresher,
        }
    }
}

/// Daily bars with closes 1..=count, each opening half a point lower.
pub fn rising_bars(count: usize) -> Vec<Bar> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    (1..=count)
        .map(|i| {
            let close = i as f64;
            Bar::new(
                start + chrono::Duration::days(i as i64),
                close - 0.5,
                close + 1.0,
                close - 1.0,
                close,
            )
        })
        .collect()
}

/// Yahoo chart payload with one row per close, opens half a point lower.
pub fn chart_json(symbol: &str, closes: &[Option<f64>]) -> Value {
    let timestamps: Vec<i64> = (0..closes.len() as i64)
        .map(|i| FIRST_SESSION_TS + i * DAY_SECONDS)
        .collect();
    let opens: Vec<Option<f64>> = closes.iter().map(|c| c.map(|c| c - 0.5)).collect();
    let highs: Vec<Option<f64>> = closes.iter().map(|c| c.map(|c| c + 1.0)).collect();
    let lows: Vec<Option<f64>> = closes.iter().map(|c| c.map(|c| c - 1.0)).collect();
    let volumes: Vec<Option<f64>> = closes.iter().map(|c| c.map(|_| 1000.0)).collect();

    json!({
        "chart": {
            "result": [{
                "meta": {
                    "symbol": symbol,
                    "currency": "INR",
                    "gmtoffset": IST_OFFSET_SECONDS
                },
                "timestamp": timestamps,
                "indicators": {
                    "quote": [{
                        "open": opens,
                        "high": highs,
                        "low": lows,
                        "close": closes,
                        "volume": volumes
                    }]
                }
            }],
            "error": null
        }
    })
}

pub fn chart_error_json(code: &str, description: &str) -> Value {
    json!({
        "chart": {
            "result": null,
            "error": { "code": code, "description": description }
        }
    })
}

pub fn closes(count: usize) -> Vec<Option<f64>> {
    (1..=count).map(|i| Some(i as f64)).collect()
}

pub async fn mock_chart(server: &MockServer, symbol: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/v8/finance/chart/{}", symbol)))
        .and(query_param("range", "6mo"))
        .and(query_param("interval", "1d"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Provider pointed at the mock server with fast retries
pub fn yahoo_provider(server: &MockServer, retries: usize) -> YahooMarketDataProvider {
    let client = YahooRestClient::new(server.uri(), Duration::from_secs(5))
        .expect("build Yahoo client");
    YahooMarketDataProvider::with_client(Arc::new(client))
        .with_retries(retries)
        .with_min_backoff(Duration::from_millis(1))
}
