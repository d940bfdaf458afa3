//! Unit tests for numeric helpers

use optimist_trader::common::math::{percent_change, round_to, sma};

#[test]
fn test_sma_uses_trailing_window() {
    let values = vec![1.0, 2.0, 3.0, 4.0, 5.0];
    assert_eq!(sma(&values, 2), Some(4.5));
    assert_eq!(sma(&values, 5), Some(3.0));
}

#[test]
fn test_sma_insufficient_or_zero_period() {
    let values = vec![1.0, 2.0];
    assert_eq!(sma(&values, 3), None);
    assert_eq!(sma(&values, 0), None);
}

#[test]
fn test_sma_rejects_non_finite_window() {
    let values = vec![f64::NAN, 2.0, 4.0];
    assert_eq!(sma(&values, 3), None);
    // NaN outside the window does not matter
    assert_eq!(sma(&values, 2), Some(3.0));
}

#[test]
fn test_percent_change() {
    assert_eq!(percent_change(100.0, 105.0), Some(5.0));
    assert_eq!(percent_change(0.0, 105.0), None);
    assert_eq!(round_to(percent_change(95.0, 100.0).unwrap(), 2), 5.26);
}
