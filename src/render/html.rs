//! HTML table rendering for a signal snapshot

use crate::config::AppConfig;
use crate::models::{Metric, SignalOutcome, SignalResult, SignalSnapshot, TradeSignal};

pub const DATA_NOT_AVAILABLE: &str = "Data Not Available";
pub const NOT_AVAILABLE: &str = "N/A";

/// Presentation settings for the page
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub title: String,
    pub currency_symbol: String,
    pub sma_periods: Vec<usize>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            title: "Optimist.Trader".to_string(),
            currency_symbol: "₹".to_string(),
            sma_periods: vec![50, 100, 200],
        }
    }
}

impl RenderOptions {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            currency_symbol: config.currency_symbol.clone(),
            sma_periods: config.signals.sma_periods.clone(),
            ..Self::default()
        }
    }

    /// Columns after the stock name: price, change, one per SMA, signal
    pub fn data_column_count(&self) -> usize {
        self.sma_periods.len() + 3
    }
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

pub fn format_price(value: f64, currency_symbol: &str) -> String {
    format!("{}{:.2}", currency_symbol, value)
}

pub fn format_percent(metric: Metric) -> String {
    match metric {
        Metric::Present(v) => format!("{:.2}%", v),
        Metric::Unavailable => NOT_AVAILABLE.to_string(),
    }
}

pub fn format_metric(metric: Metric) -> String {
    match metric {
        Metric::Present(v) => format!("{:.2}", v),
        Metric::Unavailable => NOT_AVAILABLE.to_string(),
    }
}

fn signal_class(signal: TradeSignal) -> &'static str {
    match signal {
        TradeSignal::Buy => "signal-buy",
        TradeSignal::Sell => "signal-sell",
        TradeSignal::NotAvailable => "signal-na",
    }
}

fn change_class(metric: Metric) -> &'static str {
    match metric {
        Metric::Present(v) if v > 0.0 => "change-up",
        Metric::Present(v) if v < 0.0 => "change-down",
        _ => "change-flat",
    }
}

/// One `<tr>` for a ticker
pub fn render_row(result: &SignalResult, options: &RenderOptions) -> String {
    let symbol = escape_html(&result.symbol);

    match &result.outcome {
        SignalOutcome::DataNotAvailable { .. } => format!(
            "<tr>\n<td>{}</td>\n<td colspan=\"{}\" class=\"no-data\">{}</td>\n</tr>\n",
            symbol,
            options.data_column_count(),
            DATA_NOT_AVAILABLE
        ),
        SignalOutcome::Computed(metrics) => {
            let mut row = String::from("<tr>\n");
            row.push_str(&format!("<td>{}</td>\n", symbol));
            row.push_str(&format!(
                "<td>{}</td>\n",
                escape_html(&format_price(metrics.close, &options.currency_symbol))
            ));
            row.push_str(&format!(
                "<td class=\"{}\">{}</td>\n",
                change_class(metrics.change_percent),
                format_percent(metrics.change_percent)
            ));
            for &period in &options.sma_periods {
                row.push_str(&format!("<td>{}</td>\n", format_metric(metrics.sma(period))));
            }
            row.push_str(&format!(
                "<td class=\"{}\">{}</td>\n",
                signal_class(metrics.signal),
                metrics.signal
            ));
            row.push_str("</tr>\n");
            row
        }
    }
}

fn render_header(options: &RenderOptions) -> String {
    let mut header = String::from("<tr><th>Stock</th><th>Price</th><th>Change</th>");
    for period in &options.sma_periods {
        header.push_str(&format!("<th>SMA {}</th>", period));
    }
    header.push_str("<th>Signal</th></tr>\n");
    header
}

fn page_open(options: &RenderOptions) -> String {
    let title = escape_html(&options.title);
    let mut output = String::new();
    output.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    output.push_str("<meta charset=\"UTF-8\">\n");
    output.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    output.push_str(&format!("<title>{}</title>\n", title));
    output.push_str("<style>\n");
    output.push_str("body { font-family: Arial, sans-serif; max-width: 1100px; margin: 0 auto; padding: 20px; }\n");
    output.push_str("table { border-collapse: collapse; width: 100%; margin: 20px 0; }\n");
    output.push_str("th, td { border: 1px solid #ddd; padding: 10px; text-align: right; }\n");
    output.push_str("td:first-child, th:first-child { text-align: left; }\n");
    output.push_str("th { background-color: #1f4e79; color: white; }\n");
    output.push_str("tr:nth-child(even) { background-color: #f4f6f8; }\n");
    output.push_str(".no-data { text-align: center; color: #888; }\n");
    output.push_str(".change-up, .signal-buy { color: #1a7f37; }\n");
    output.push_str(".change-down, .signal-sell { color: #c62828; }\n");
    output.push_str(".signal-na { color: #888; }\n");
    output.push_str("</style>\n</head>\n<body>\n");
    output.push_str(&format!("<h1>{}</h1>\n", title));
    output
}

/// Full page for a completed refresh pass
pub fn render_page(snapshot: &SignalSnapshot, options: &RenderOptions) -> String {
    let mut output = page_open(options);
    output.push_str(&format!(
        "<p><em>Last updated: {}</em></p>\n",
        snapshot.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    output.push_str("<table>\n");
    output.push_str(&render_header(options));
    for result in &snapshot.results {
        output.push_str(&render_row(result, options));
    }
    output.push_str("</table>\n</body>\n</html>\n");
    output
}

/// Page served before the first refresh pass has completed
pub fn render_empty_page(options: &RenderOptions) -> String {
    let mut output = page_open(options);
    output.push_str("<p>Stock data is being prepared. Please check back shortly.</p>\n");
    output.push_str("</body>\n</html>\n");
    output
}
