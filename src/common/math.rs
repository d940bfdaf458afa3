//! Small numeric routines used by the indicators

/// Simple moving average over the trailing `period` values.
///
/// Returns `None` when there are fewer than `period` values, the period is zero,
/// or the window contains a non-finite value.
pub fn sma(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }

    let window = &values[values.len() - period..];
    if window.iter().any(|v| !v.is_finite()) {
        return None;
    }

    Some(window.iter().sum::<f64>() / period as f64)
}

/// Percentage change from `from` to `to`.
pub fn percent_change(from: f64, to: f64) -> Option<f64> {
    if !from.is_finite() || !to.is_finite() || from == 0.0 {
        return None;
    }
    Some((to - from) / from * 100.0)
}

/// Round to `decimals` places, used when comparing presentation values.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
