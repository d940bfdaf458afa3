pub mod error;
pub mod price_change;
pub mod trend;

pub use error::IndicatorError;
pub use price_change::*;
