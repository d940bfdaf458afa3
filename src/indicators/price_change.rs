//! Intraday change of a single bar

use crate::common::math;
use crate::indicators::error::IndicatorError;
use crate::models::Bar;

/// Percentage move from the bar's open to its close.
///
/// (close - open) / open * 100, defined only for a positive open.
pub fn calculate_change_percent(bar: &Bar) -> Result<f64, IndicatorError> {
    if !bar.open.is_finite() || !bar.close.is_finite() {
        return Err(IndicatorError::NonFinite);
    }
    if bar.open <= 0.0 {
        return Err(IndicatorError::InvalidOpen(bar.open));
    }
    math::percent_change(bar.open, bar.close).ok_or(IndicatorError::NonFinite)
}
