//! Yahoo Finance v8 chart response payloads

use crate::models::Bar;
use chrono::DateTime;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ChartResponse {
    pub chart: Chart,
}

#[derive(Debug, Deserialize)]
pub struct Chart {
    pub result: Option<Vec<ChartResult>>,
    pub error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
pub struct ChartError {
    pub code: String,
    pub description: String,
}

impl ChartError {
    pub fn is_not_found(&self) -> bool {
        self.code.eq_ignore_ascii_case("Not Found")
    }
}

#[derive(Debug, Deserialize)]
pub struct ChartResult {
    #[serde(default)]
    pub meta: ChartMeta,
    // Absent when the range holds no trading days
    #[serde(default)]
    pub timestamp: Vec<i64>,
    #[serde(default)]
    pub indicators: ChartIndicators,
}

#[derive(Debug, Default, Deserialize)]
pub struct ChartMeta {
    pub symbol: Option<String>,
    pub currency: Option<String>,
    /// Exchange offset from UTC in seconds
    #[serde(default, rename = "gmtoffset")]
    pub gmt_offset: i64,
}

#[derive(Debug, Default, Deserialize)]
pub struct ChartIndicators {
    #[serde(default)]
    pub quote: Vec<ChartQuote>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ChartQuote {
    #[serde(default)]
    pub open: Vec<Option<f64>>,
    #[serde(default)]
    pub high: Vec<Option<f64>>,
    #[serde(default)]
    pub low: Vec<Option<f64>>,
    #[serde(default)]
    pub close: Vec<Option<f64>>,
    #[serde(default)]
    pub volume: Vec<Option<f64>>,
}

impl ChartResult {
    /// Convert the column arrays into bars, oldest first.
    ///
    /// Rows missing open or close, or with an out-of-range timestamp, are
    /// dropped. Dates are the exchange-local calendar date of each timestamp.
    /// When several rows fall on the same date (the live quote arrives as its
    /// own row) the one with the latest timestamp wins.
    pub fn into_bars(self) -> Vec<Bar> {
        let Some(quote) = self.indicators.quote.into_iter().next() else {
            return Vec::new();
        };
        let offset = self.meta.gmt_offset;

        let column = |values: &[Option<f64>], i: usize| values.get(i).copied().flatten();

        let mut rows: Vec<(i64, Bar)> = self
            .timestamp
            .iter()
            .enumerate()
            .filter_map(|(i, &ts)| {
                let local = ts.checked_add(offset)?;
                let date = DateTime::from_timestamp(local, 0)?.date_naive();
                let open = column(&quote.open, i)?;
                let close = column(&quote.close, i)?;
                let high = column(&quote.high, i).unwrap_or(open.max(close));
                let low = column(&quote.low, i).unwrap_or(open.min(close));

                let bar = Bar::new(date, open, high, low, close);
                let bar = match column(&quote.volume, i) {
                    Some(volume) => bar.with_volume(volume),
                    None => bar,
                };
                Some((ts, bar))
            })
            .collect();

        rows.sort_by_key(|(ts, bar)| (bar.date, *ts));
        rows.dedup_by(|later, kept| {
            if later.1.date == kept.1.date {
                std::mem::swap(later, kept);
                true
            } else {
                false
            }
        });

        rows.into_iter().map(|(_, bar)| bar).collect()
    }
}
