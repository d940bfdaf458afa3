//! SMA (Simple Moving Average) indicator

use crate::common::math;
use crate::indicators::error::IndicatorError;
use crate::models::{Bar, Metric, SmaValue};

/// Mean of the last `period` closes, ending at the most recent bar
pub fn calculate_sma(bars: &[Bar], period: usize) -> Result<f64, IndicatorError> {
    if period == 0 {
        return Err(IndicatorError::InvalidPeriod);
    }
    if bars.len() < period {
        return Err(IndicatorError::InsufficientData {
            period,
            available: bars.len(),
        });
    }

    let closes: Vec<f64> = bars[bars.len() - period..].iter().map(|b| b.close).collect();
    math::sma(&closes, period).ok_or(IndicatorError::NonFinite)
}

/// Calculate several SMAs at once, in the order of `periods`.
///
/// Periods that cannot be computed are kept as `Metric::Unavailable`.
pub fn calculate_smas(bars: &[Bar], periods: &[usize]) -> Vec<SmaValue> {
    calculate_smas_detailed(bars, periods)
        .into_iter()
        .map(|(sma, _)| sma)
        .collect()
}

/// Same as [`calculate_smas`] but reports why each missing period is missing
pub fn calculate_smas_detailed(
    bars: &[Bar],
    periods: &[usize],
) -> Vec<(SmaValue, Option<IndicatorError>)> {
    periods
        .iter()
        .map(|&period| match calculate_sma(bars, period) {
            Ok(value) => (
                SmaValue {
                    period,
                    value: Metric::Present(value),
                },
                None,
            ),
            Err(e) => (
                SmaValue {
                    period,
                    value: Metric::Unavailable,
                },
                Some(e),
            ),
        })
        .collect()
}
