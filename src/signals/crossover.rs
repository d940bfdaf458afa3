//! Moving-average crossover decision

use crate::models::{Metric, TradeSignal};

/// Buy when the fast SMA is above the slow SMA, Sell otherwise.
///
/// A tie is a Sell. If either average is unavailable there is nothing to
/// compare and the signal is `NotAvailable`.
pub fn crossover_signal(fast: Metric, slow: Metric) -> TradeSignal {
    match (fast, slow) {
        (Metric::Present(fast), Metric::Present(slow)) => {
            if fast > slow {
                TradeSignal::Buy
            } else {
                TradeSignal::Sell
            }
        }
        _ => TradeSignal::NotAvailable,
    }
}
