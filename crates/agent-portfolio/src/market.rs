//! Simulated market snapshot
//!
//! No prices are fetched. The data-fetch stage stands in for that call and
//! the report prompt embeds this fixed snapshot instead.

use crate::model::QuantMetrics;
use serde::Serialize;

/// Tickers held by the simulated portfolio
pub const TRACKED_TICKERS: [&str; 5] = ["AAPL", "MSFT", "GOOGL", "AMZN", "NVDA"];

/// Finding attributed to the historical-context lookup
pub const HISTORICAL_CONTEXT: &str = "The current market condition shows similarities to the tech correction of Q4 2018, but with stronger company fundamentals today.";

/// One position in the snapshot
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Holding {
    pub symbol: &'static str,
    pub price: f64,
    /// Day's change in percent
    pub change_pct: f64,
}

impl Holding {
    /// `AAPL: $195.50 (+1.2%)`
    pub fn summary(&self) -> String {
        format!("{}: ${:.2} ({:+.1}%)", self.symbol, self.price, self.change_pct)
    }
}

/// Portfolio snapshot handed to the report prompt
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketSnapshot {
    pub portfolio_value: f64,
    pub day_change_pct: f64,
    pub day_change_value: f64,
    pub holdings: Vec<Holding>,
}

impl MarketSnapshot {
    /// The fixed snapshot used by every run
    pub fn simulated() -> Self {
        let holdings = vec![
            Holding { symbol: "AAPL", price: 195.50, change_pct: 1.2 },
            Holding { symbol: "MSFT", price: 450.10, change_pct: 0.5 },
            Holding { symbol: "GOOGL", price: 180.25, change_pct: 1.0 },
            Holding { symbol: "AMZN", price: 185.00, change_pct: -0.2 },
            Holding { symbol: "NVDA", price: 1250.75, change_pct: 2.5 },
        ];

        Self {
            portfolio_value: 1_250_000.0,
            day_change_pct: 0.8,
            day_change_value: 10_000.0,
            holdings,
        }
    }

    /// `+0.8% (+$10,000)`
    pub fn day_change_summary(&self) -> String {
        format!(
            "{:+.1}% ({})",
            self.day_change_pct,
            format_usd(self.day_change_value, true)
        )
    }
}

/// Lines describing the risk metrics, as shown to the report writer
pub fn metric_lines(metrics: &QuantMetrics) -> Vec<String> {
    vec![
        format!(
            "Portfolio Beta: {:.2} ({})",
            metrics.beta,
            describe_beta(metrics.beta)
        ),
        format!(
            "Value at Risk (VaR) @ 95% confidence (1 day): {} (Potential loss in a single bad day)",
            format_usd(metrics.value_at_risk, false)
        ),
        format!(
            "Sector Concentration (Tech): {:.0}%",
            metrics.concentration * 100.0
        ),
    ]
}

fn describe_beta(beta: f64) -> &'static str {
    if beta > 1.0 {
        "Slightly more volatile than the market"
    } else if beta < 1.0 {
        "Less volatile than the market"
    } else {
        "Moves with the market"
    }
}

/// Whole-dollar amount with thousands separators, e.g. `-$25,000`
///
/// With `signed`, positive amounts get a leading `+`.
pub fn format_usd(amount: f64, signed: bool) -> String {
    let sign = if amount < 0.0 {
        "-"
    } else if signed {
        "+"
    } else {
        ""
    };

    let digits = format!("{:.0}", amount.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{sign}${grouped}")
}
