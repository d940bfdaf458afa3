use serde::{Deserialize, Serialize};
use std::fmt;

/// Yahoo exchange suffixes that are stripped from display symbols.
///
/// Suffixes outside this list are kept, so share classes like `BRK.B` survive.
pub const KNOWN_EXCHANGE_SUFFIXES: [&str; 20] = [
    "NS", "BO", "L", "TO", "V", "AX", "HK", "SS", "SZ", "T", "KS", "KQ", "DE", "F", "PA", "AS",
    "MI", "MC", "SW", "SI",
];

/// Provider-qualified ticker such as `TCS.NS`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Ticker {
    raw: String,
}

impl Ticker {
    pub fn new(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into().trim().to_uppercase(),
        }
    }

    /// Full provider ticker, used for requests
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Display symbol with a recognised exchange suffix removed
    pub fn symbol(&self) -> &str {
        match self.split_suffix() {
            Some((symbol, _)) => symbol,
            None => &self.raw,
        }
    }

    /// Exchange suffix, when it is a recognised one
    pub fn exchange(&self) -> Option<&str> {
        self.split_suffix().map(|(_, exchange)| exchange)
    }

    fn split_suffix(&self) -> Option<(&str, &str)> {
        let (symbol, suffix) = self.raw.rsplit_once('.')?;
        if symbol.is_empty() || !KNOWN_EXCHANGE_SUFFIXES.contains(&suffix) {
            return None;
        }
        Some((symbol, suffix))
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<String> for Ticker {
    fn from(raw: String) -> Self {
        Ticker::new(raw)
    }
}

impl From<Ticker> for String {
    fn from(ticker: Ticker) -> Self {
        ticker.raw
    }
}

impl From<&str> for Ticker {
    fn from(raw: &str) -> Self {
        Ticker::new(raw)
    }
}
