use crate::models::ticker::Ticker;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A numeric metric that may not be computable for a ticker.
///
/// Serialized as a number, or `null` when unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "Option<f64>", into = "Option<f64>")]
pub enum Metric {
    Present(f64),
    Unavailable,
}

impl Metric {
    pub fn value(&self) -> Option<f64> {
        match self {
            Metric::Present(v) => Some(*v),
            Metric::Unavailable => None,
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, Metric::Present(_))
    }
}

impl From<Option<f64>> for Metric {
    fn from(value: Option<f64>) -> Self {
        match value {
            Some(v) => Metric::Present(v),
            None => Metric::Unavailable,
        }
    }
}

impl From<Metric> for Option<f64> {
    fn from(metric: Metric) -> Self {
        metric.value()
    }
}

/// Categorical trading signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TradeSignal {
    Buy,
    Sell,
    /// One of the crossover inputs was unavailable
    #[serde(rename = "N/A")]
    NotAvailable,
}

impl fmt::Display for TradeSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeSignal::Buy => write!(f, "Buy"),
            TradeSignal::Sell => write!(f, "Sell"),
            TradeSignal::NotAvailable => write!(f, "N/A"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SmaValue {
    pub period: usize,
    pub value: Metric,
}

/// Metrics derived from the latest bar and the trailing closes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalMetrics {
    pub close: f64,
    pub open: f64,
    pub change_percent: Metric,
    pub smas: Vec<SmaValue>,
    pub signal: TradeSignal,
}

impl SignalMetrics {
    /// SMA for `period`; unavailable when the period was not computed
    pub fn sma(&self, period: usize) -> Metric {
        self.smas
            .iter()
            .find(|s| s.period == period)
            .map(|s| s.value)
            .unwrap_or(Metric::Unavailable)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SignalOutcome {
    Computed(SignalMetrics),
    DataNotAvailable { reason: String },
}

/// One row of a refresh pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalResult {
    pub ticker: Ticker,
    pub symbol: String,
    pub outcome: SignalOutcome,
}

impl SignalResult {
    pub fn computed(ticker: Ticker, metrics: SignalMetrics) -> Self {
        Self::with_outcome(ticker, SignalOutcome::Computed(metrics))
    }

    pub fn not_available(ticker: Ticker, reason: impl Into<String>) -> Self {
        Self::with_outcome(
            ticker,
            SignalOutcome::DataNotAvailable {
                reason: reason.into(),
            },
        )
    }

    pub fn with_outcome(ticker: Ticker, outcome: SignalOutcome) -> Self {
        let symbol = ticker.symbol().to_string();
        Self {
            ticker,
            symbol,
            outcome,
        }
    }

    pub fn metrics(&self) -> Option<&SignalMetrics> {
        match &self.outcome {
            SignalOutcome::Computed(metrics) => Some(metrics),
            SignalOutcome::DataNotAvailable { .. } => None,
        }
    }

    pub fn is_available(&self) -> bool {
        self.metrics().is_some()
    }
}

/// The complete output of one refresh pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalSnapshot {
    pub generated_at: DateTime<Utc>,
    pub results: Vec<SignalResult>,
}

impl SignalSnapshot {
    pub fn new(results: Vec<SignalResult>) -> Self {
        Self {
            generated_at: Utc::now(),
            results,
        }
    }

    pub fn available_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_available()).count()
    }
}
