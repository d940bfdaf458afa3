//! Unit tests for HTML rendering

use optimist_trader::models::{
    Metric, SignalMetrics, SignalResult, SignalSnapshot, SmaValue, Ticker, TradeSignal,
};
use optimist_trader::render::html::{
    escape_html, format_percent, format_price, DATA_NOT_AVAILABLE, NOT_AVAILABLE,
};
use optimist_trader::render::{render_empty_page, render_page, render_row, RenderOptions};

fn computed(ticker: &str, change: Metric, sma_200: Metric, signal: TradeSignal) -> SignalResult {
    SignalResult::computed(
        Ticker::new(ticker),
        SignalMetrics {
            close: 2450.5,
            open: 2400.0,
            change_percent: change,
            smas: vec![
                SmaValue {
                    period: 50,
                    value: Metric::Present(2380.123),
                },
                SmaValue {
                    period: 100,
                    value: Metric::Present(2300.0),
                },
                SmaValue {
                    period: 200,
                    value: sma_200,
                },
            ],
            signal,
        },
    )
}

#[test]
fn test_format_helpers() {
    assert_eq!(format_price(100.0, "₹"), "₹100.00");
    assert_eq!(format_percent(Metric::Present(5.2631)), "5.26%");
    assert_eq!(format_percent(Metric::Unavailable), NOT_AVAILABLE);
    assert_eq!(escape_html("<a&b>"), "&lt;a&amp;b&gt;");
}

#[test]
fn test_computed_row_cells() {
    let options = RenderOptions::default();
    let row = render_row(
        &computed(
            "RELIANCE.NS",
            Metric::Present(2.104),
            Metric::Unavailable,
            TradeSignal::Buy,
        ),
        &options,
    );

    assert!(row.contains("<td>RELIANCE</td>"));
    assert!(row.contains("<td>₹2450.50</td>"));
    assert!(row.contains("<td class=\"change-up\">2.10%</td>"));
    assert!(row.contains("<td>2380.12</td>"));
    assert!(row.contains("<td>2300.00</td>"));
    assert!(row.contains("<td>N/A</td>"));
    assert!(row.contains("<td class=\"signal-buy\">Buy</td>"));
    assert!(!row.contains(DATA_NOT_AVAILABLE));
}

#[test]
fn test_row_classes_for_sell_and_missing_signal() {
    let options = RenderOptions::default();

    let down = render_row(
        &computed(
            "TCS.NS",
            Metric::Present(-1.5),
            Metric::Present(2200.0),
            TradeSignal::Sell,
        ),
        &options,
    );
    assert!(down.contains("class=\"change-down\">-1.50%"));
    assert!(down.contains("<td class=\"signal-sell\">Sell</td>"));

    let missing = render_row(
        &computed(
            "TCS.NS",
            Metric::Unavailable,
            Metric::Unavailable,
            TradeSignal::NotAvailable,
        ),
        &options,
    );
    assert!(missing.contains("<td class=\"change-flat\">N/A</td>"));
    assert!(missing.contains("<td class=\"signal-na\">N/A</td>"));
}

#[test]
fn test_not_available_row_spans_data_columns() {
    let options = RenderOptions::default();
    let row = render_row(
        &SignalResult::not_available(Ticker::new("BAD.NS"), "no data"),
        &options,
    );

    assert!(row.contains("<td>BAD</td>"));
    assert!(row.contains("colspan=\"6\""));
    assert!(row.contains(DATA_NOT_AVAILABLE));
    assert!(!row.contains("no data"));
}

#[test]
fn test_page_lists_rows_in_order() {
    let options = RenderOptions::default();
    let snapshot = SignalSnapshot::new(vec![
        computed(
            "ZEEL.NS",
            Metric::Present(1.0),
            Metric::Present(1.0),
            TradeSignal::Buy,
        ),
        SignalResult::not_available(Ticker::new("ABB.NS"), "timeout"),
    ]);

    let page = render_page(&snapshot, &options);

    assert!(page.starts_with("<!DOCTYPE html>"));
    assert!(page.contains("<title>Optimist.Trader</title>"));
    assert!(page.contains("<th>SMA 50</th><th>SMA 100</th><th>SMA 200</th>"));
    assert!(page.contains("Last updated:"));
    let zeel = page.find("<td>ZEEL</td>").unwrap();
    let abb = page.find("<td>ABB</td>").unwrap();
    assert!(zeel < abb);
}

#[test]
fn test_header_follows_configured_periods() {
    let options = RenderOptions {
        sma_periods: vec![20, 50],
        ..RenderOptions::default()
    };
    let snapshot = SignalSnapshot::new(vec![SignalResult::not_available(
        Ticker::new("X.NS"),
        "x",
    )]);

    let page = render_page(&snapshot, &options);

    assert!(page.contains("<th>SMA 20</th><th>SMA 50</th><th>Signal</th>"));
    assert!(!page.contains("SMA 200"));
    assert!(page.contains("colspan=\"5\""));
}

#[test]
fn test_empty_page() {
    let page = render_empty_page(&RenderOptions::default());
    assert!(page.contains("being prepared"));
    assert!(!page.contains("<table>"));
}
