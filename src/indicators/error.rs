use thiserror::Error;

/// Degenerate inputs for a single metric.
///
/// These never abort a ticker; the affected metric becomes unavailable.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum IndicatorError {
    #[error("open price must be positive, got {0}")]
    InvalidOpen(f64),
    #[error("insufficient data for period {period}: {available} bars available")]
    InsufficientData { period: usize, available: usize },
    #[error("non-finite price in window")]
    NonFinite,
    #[error("period must be greater than zero")]
    InvalidPeriod,
}
