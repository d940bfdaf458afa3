//! Shared data models spanning the engine layers.

pub mod bar;
pub mod signal;
pub mod ticker;

pub use bar::{Bar, PriceSeries};
pub use signal::{
    Metric, SignalMetrics, SignalOutcome, SignalResult, SignalSnapshot, SmaValue, TradeSignal,
};
pub use ticker::Ticker;
