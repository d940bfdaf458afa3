//! Environment-driven configuration
//!
//! Every setting has a default, so a bare
//! `cargo run --bin server` serves the NSE universe on port 5000.

use crate::models::ticker::Ticker;
use std::env;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_HISTORY_RANGE: &str = "6mo";
pub const DEFAULT_SMA_PERIODS: [usize; 3] = [50, 100, 200];
pub const DEFAULT_FAST_PERIOD: usize = 50;
pub const DEFAULT_SLOW_PERIOD: usize = 100;
pub const DEFAULT_REFRESH_HOUR: u32 = 20;
pub const DEFAULT_REFRESH_MINUTE: u32 = 50;
pub const DEFAULT_FETCH_TIMEOUT_SECONDS: u64 = 10;
pub const DEFAULT_FETCH_RETRIES: usize = 2;
pub const DEFAULT_YAHOO_BASE_URL: &str = "https://query1.finance.yahoo.com";
pub const DEFAULT_CURRENCY_SYMBOL: &str = "₹";

pub const DEFAULT_TICKERS: [&str; 15] = [
    "TCS.NS",
    "RELIANCE.NS",
    "INFY.NS",
    "HDFC.NS",
    "ICICIBANK.NS",
    "AXISBANK.NS",
    "SBIN.NS",
    "HDFCBANK.NS",
    "LT.NS",
    "BAJFINANCE.NS",
    "ITC.NS",
    "ONGC.NS",
    "TATASTEEL.NS",
    "BHARTIARTL.NS",
    "WIPRO.NS",
];

/// Ranges accepted by the Yahoo chart API for daily bars.
const VALID_RANGES: [&str; 9] = ["1mo", "3mo", "6mo", "1y", "2y", "5y", "10y", "ytd", "max"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}' ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    fn invalid(key: &'static str, value: &str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            key,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

/// Get the deployment environment (`sandbox` unless `ENVIRONMENT` says otherwise)
pub fn get_environment() -> String {
    env::var("ENVIRONMENT")
        .map(|e| e.trim().to_lowercase())
        .ok()
        .filter(|e| !e.is_empty())
        .unwrap_or_else(|| "sandbox".to_string())
}

/// Moving-average crossover inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrossoverConfig {
    pub fast_period: usize,
    pub slow_period: usize,
}

impl Default for CrossoverConfig {
    fn default() -> Self {
        Self {
            fast_period: DEFAULT_FAST_PERIOD,
            slow_period: DEFAULT_SLOW_PERIOD,
        }
    }
}

/// Settings consumed by the signal engine and the refresh pass
#[derive(Debug, Clone, PartialEq)]
pub struct SignalConfig {
    pub tickers: Vec<Ticker>,
    pub history_range: String,
    pub sma_periods: Vec<usize>,
    pub crossover: CrossoverConfig,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            tickers: DEFAULT_TICKERS.iter().map(|t| Ticker::new(*t)).collect(),
            history_range: DEFAULT_HISTORY_RANGE.to_string(),
            sma_periods: DEFAULT_SMA_PERIODS.to_vec(),
            crossover: CrossoverConfig::default(),
        }
    }
}

/// Upstream market data settings
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub retries: usize,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_YAHOO_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECONDS),
            retries: DEFAULT_FETCH_RETRIES,
        }
    }
}

/// When the daily refresh fires
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshSchedule {
    Daily { hour: u32, minute: u32 },
    Cron(String),
}

impl RefreshSchedule {
    /// Six-field cron expression (`sec min hour day month weekday`)
    pub fn cron_expression(&self) -> String {
        match self {
            RefreshSchedule::Daily { hour, minute } => format!("0 {} {} * * *", minute, hour),
            RefreshSchedule::Cron(expr) => expr.clone(),
        }
    }
}

impl Default for RefreshSchedule {
    fn default() -> Self {
        RefreshSchedule::Daily {
            hour: DEFAULT_REFRESH_HOUR,
            minute: DEFAULT_REFRESH_MINUTE,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub port: u16,
    pub signals: SignalConfig,
    pub provider: ProviderConfig,
    pub schedule: RefreshSchedule,
    pub currency_symbol: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            signals: SignalConfig::default(),
            provider: ProviderConfig::default(),
            schedule: RefreshSchedule::default(),
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
        }
    }
}

impl AppConfig {
    /// Load from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load using an arbitrary key lookup; unset or blank keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut config = AppConfig::default();

        if let Some(port) = get("PORT") {
            config.port = port
                .parse()
                .map_err(|_| ConfigError::invalid("PORT", &port, "expected a port number"))?;
        }

        if let Some(tickers) = get("TICKERS") {
            config.signals.tickers = parse_tickers(&tickers)?;
        }

        if let Some(range) = get("HISTORY_RANGE") {
            if !VALID_RANGES.contains(&range.as_str()) {
                return Err(ConfigError::invalid(
                    "HISTORY_RANGE",
                    &range,
                    format!("expected one of {}", VALID_RANGES.join(", ")),
                ));
            }
            config.signals.history_range = range;
        }

        if let Some(periods) = get("SMA_PERIODS") {
            config.signals.sma_periods = parse_periods(&periods)?;
        }

        if let Some(fast) = get("SIGNAL_FAST_PERIOD") {
            config.signals.crossover.fast_period = parse_positive("SIGNAL_FAST_PERIOD", &fast)?;
        }

        if let Some(slow) = get("SIGNAL_SLOW_PERIOD") {
            config.signals.crossover.slow_period = parse_positive("SIGNAL_SLOW_PERIOD", &slow)?;
        }

        validate_crossover(&config.signals)?;

        config.schedule = match get("REFRESH_CRON") {
            Some(expr) => RefreshSchedule::Cron(expr),
            None => {
                let hour = match get("REFRESH_HOUR") {
                    Some(h) => parse_bounded("REFRESH_HOUR", &h, 23)?,
                    None => DEFAULT_REFRESH_HOUR,
                };
                let minute = match get("REFRESH_MINUTE") {
                    Some(m) => parse_bounded("REFRESH_MINUTE", &m, 59)?,
                    None => DEFAULT_REFRESH_MINUTE,
                };
                RefreshSchedule::Daily { hour, minute }
            }
        };

        if let Some(timeout) = get("FETCH_TIMEOUT_SECONDS") {
            let secs = parse_positive("FETCH_TIMEOUT_SECONDS", &timeout)?;
            config.provider.timeout = Duration::from_secs(secs as u64);
        }

        if let Some(retries) = get("FETCH_RETRIES") {
            config.provider.retries = retries.parse().map_err(|_| {
                ConfigError::invalid("FETCH_RETRIES", &retries, "expected a non-negative integer")
            })?;
        }

        if let Some(url) = get("YAHOO_BASE_URL") {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::invalid(
                    "YAHOO_BASE_URL",
                    &url,
                    "expected an http(s) URL",
                ));
            }
            config.provider.base_url = url.trim_end_matches('/').to_string();
        }

        if let Some(currency) = get("CURRENCY_SYMBOL") {
            config.currency_symbol = currency;
        }

        Ok(config)
    }
}

fn parse_tickers(raw: &str) -> Result<Vec<Ticker>, ConfigError> {
    let tickers: Vec<Ticker> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(Ticker::new)
        .collect();

    if tickers.is_empty() {
        return Err(ConfigError::invalid("TICKERS", raw, "no tickers listed"));
    }
    Ok(tickers)
}

fn parse_periods(raw: &str) -> Result<Vec<usize>, ConfigError> {
    let mut periods = Vec::new();
    for part in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let period = parse_positive("SMA_PERIODS", part)?;
        if !periods.contains(&period) {
            periods.push(period);
        }
    }

    if periods.is_empty() {
        return Err(ConfigError::invalid("SMA_PERIODS", raw, "no periods listed"));
    }
    periods.sort_unstable();
    Ok(periods)
}

fn parse_positive(key: &'static str, raw: &str) -> Result<usize, ConfigError> {
    match raw.parse::<usize>() {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(ConfigError::invalid(key, raw, "expected a positive integer")),
    }
}

fn parse_bounded(key: &'static str, raw: &str, max: u32) -> Result<u32, ConfigError> {
    match raw.parse::<u32>() {
        Ok(v) if v <= max => Ok(v),
        _ => Err(ConfigError::invalid(
            key,
            raw,
            format!("expected an integer between 0 and {}", max),
        )),
    }
}

fn validate_crossover(signals: &SignalConfig) -> Result<(), ConfigError> {
    let CrossoverConfig {
        fast_period,
        slow_period,
    } = signals.crossover;

    for (key, period) in [
        ("SIGNAL_FAST_PERIOD", fast_period),
        ("SIGNAL_SLOW_PERIOD", slow_period),
    ] {
        if !signals.sma_periods.contains(&period) {
            return Err(ConfigError::invalid(
                key,
                &period.to_string(),
                "period must be listed in SMA_PERIODS",
            ));
        }
    }

    if fast_period >= slow_period {
        return Err(ConfigError::invalid(
            "SIGNAL_FAST_PERIOD",
            &fast_period.to_string(),
            "fast period must be shorter than the slow period",
        ));
    }
    Ok(())
}
