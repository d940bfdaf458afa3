//! Prometheus metrics for the HTTP layer and the refresh pass

use prometheus::{
    Encoder, Gauge, Histogram, HistogramOpts, IntCounter, IntGauge, Registry, TextEncoder,
};

pub struct Metrics {
    registry: Registry,
    pub http_requests_total: IntCounter,
    pub http_request_duration_seconds: Histogram,
    pub http_requests_in_flight: IntGauge,
    pub refresh_runs_total: IntCounter,
    pub refresh_failures_total: IntCounter,
    pub refresh_skipped_total: IntCounter,
    pub ticker_fetch_failures_total: IntCounter,
    pub refresh_duration_seconds: Histogram,
    pub last_refresh_timestamp_seconds: Gauge,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let http_requests_total =
            IntCounter::new("http_requests_total", "Total number of HTTP requests")?;
        let http_request_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request latency in seconds",
        ))?;
        let http_requests_in_flight = IntGauge::new(
            "http_requests_in_flight",
            "Number of HTTP requests currently being served",
        )?;
        let refresh_runs_total =
            IntCounter::new("refresh_runs_total", "Completed signal refresh passes")?;
        let refresh_failures_total =
            IntCounter::new("refresh_failures_total", "Refresh passes aborted by an error")?;
        let refresh_skipped_total = IntCounter::new(
            "refresh_skipped_total",
            "Refresh triggers skipped because a pass was already running",
        )?;
        let ticker_fetch_failures_total = IntCounter::new(
            "ticker_fetch_failures_total",
            "Tickers that produced no data during a refresh pass",
        )?;
        let refresh_duration_seconds = Histogram::with_opts(
            HistogramOpts::new(
                "refresh_duration_seconds",
                "Wall time of a full refresh pass in seconds",
            )
            .buckets(vec![0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0, 120.0]),
        )?;
        let last_refresh_timestamp_seconds = Gauge::new(
            "last_refresh_timestamp_seconds",
            "Unix time of the last completed refresh pass",
        )?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(http_requests_in_flight.clone()))?;
        registry.register(Box::new(refresh_runs_total.clone()))?;
        registry.register(Box::new(refresh_failures_total.clone()))?;
        registry.register(Box::new(refresh_skipped_total.clone()))?;
        registry.register(Box::new(ticker_fetch_failures_total.clone()))?;
        registry.register(Box::new(refresh_duration_seconds.clone()))?;
        registry.register(Box::new(last_refresh_timestamp_seconds.clone()))?;

        Ok(Self {
            registry,
            http_requests_total,
            http_request_duration_seconds,
            http_requests_in_flight,
            refresh_runs_total,
            refresh_failures_total,
            refresh_skipped_total,
            ticker_fetch_failures_total,
            refresh_duration_seconds,
            last_refresh_timestamp_seconds,
        })
    }

    /// Render all registered metrics in the Prometheus text format
    pub fn export(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
