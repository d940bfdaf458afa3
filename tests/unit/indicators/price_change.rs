//! Unit tests for intraday change percent

use chrono::NaiveDate;
use optimist_trader::common::math::round_to;
use optimist_trader::indicators::{calculate_change_percent, IndicatorError};
use optimist_trader::models::Bar;

fn bar(open: f64, close: f64) -> Bar {
    let date = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
    Bar::new(date, open, open.max(close), open.min(close), close)
}

#[test]
fn test_change_percent_up() {
    assert_eq!(calculate_change_percent(&bar(100.0, 105.0)).unwrap(), 5.0);
}

#[test]
fn test_change_percent_down() {
    let change = calculate_change_percent(&bar(200.0, 190.0)).unwrap();
    assert_eq!(round_to(change, 2), -5.0);
}

#[test]
fn test_change_percent_rounding() {
    let change = calculate_change_percent(&bar(95.0, 100.0)).unwrap();
    assert_eq!(round_to(change, 2), 5.26);
}

#[test]
fn test_change_percent_requires_positive_open() {
    assert_eq!(
        calculate_change_percent(&bar(0.0, 105.0)),
        Err(IndicatorError::InvalidOpen(0.0))
    );
    assert_eq!(
        calculate_change_percent(&bar(-1.0, 105.0)),
        Err(IndicatorError::InvalidOpen(-1.0))
    );
}

#[test]
fn test_change_percent_non_finite() {
    assert_eq!(
        calculate_change_percent(&bar(100.0, f64::INFINITY)),
        Err(IndicatorError::NonFinite)
    );
}
