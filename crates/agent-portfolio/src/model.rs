//! Analysis data model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sentiment label attached to a news item
///
/// Parsing is case-insensitive; anything other than the three labels is
/// rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    /// All labels, in the order they are offered to the model
    pub const LABELS: [&'static str; 3] = ["Positive", "Neutral", "Negative"];

    pub const fn as_str(self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Neutral => "Neutral",
            Sentiment::Negative => "Negative",
        }
    }
}

impl FromStr for Sentiment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "positive" => Ok(Sentiment::Positive),
            "neutral" => Ok(Sentiment::Neutral),
            "negative" => Ok(Sentiment::Negative),
            other => Err(format!("unknown sentiment label: {other:?}")),
        }
    }
}

impl TryFrom<String> for Sentiment {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A generated headline with its sentiment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub headline: String,
    pub sentiment: Sentiment,
    pub justification: String,
}

/// Portfolio risk metrics
///
/// These are fixed simulated values, not computed from market data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuantMetrics {
    /// Portfolio beta against the market
    pub beta: f64,
    /// One-day 95% value at risk in dollars; negative means a loss
    #[serde(rename = "var")]
    pub value_at_risk: f64,
    /// Share of the portfolio in the dominant sector, in `[0, 1]`
    pub concentration: f64,
}

impl QuantMetrics {
    pub const SIMULATED: QuantMetrics = QuantMetrics {
        beta: 1.15,
        value_at_risk: -25_000.0,
        concentration: 0.65,
    };
}

/// Output of a successful pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Markdown report
    pub report: String,
    /// News items, in the order the model returned them
    pub news: Vec<NewsItem>,
    pub metrics: QuantMetrics,
}
