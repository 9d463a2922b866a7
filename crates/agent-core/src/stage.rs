//! The four ordered pipeline stages

use serde::{Deserialize, Serialize};
use std::fmt;

/// One step of the analysis pipeline
///
/// The set is fixed and ordered; [`AgentStage::ALL`] lists the stages in
/// execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentStage {
    /// Fetches prices for the portfolio holdings
    DataFetch,
    /// Generates and classifies news for the holdings
    NewsAnalysis,
    /// Computes risk metrics
    QuantAnalysis,
    /// Writes the final report
    Reporting,
}

impl AgentStage {
    /// All stages in execution order
    pub const ALL: [AgentStage; 4] = [
        AgentStage::DataFetch,
        AgentStage::NewsAnalysis,
        AgentStage::QuantAnalysis,
        AgentStage::Reporting,
    ];

    /// Position of the stage in [`AgentStage::ALL`]
    pub const fn index(self) -> usize {
        match self {
            AgentStage::DataFetch => 0,
            AgentStage::NewsAnalysis => 1,
            AgentStage::QuantAnalysis => 2,
            AgentStage::Reporting => 3,
        }
    }

    /// Name shown on the status card
    pub const fn display_name(self) -> &'static str {
        match self {
            AgentStage::DataFetch => "Data Fetcher Agent",
            AgentStage::NewsAnalysis => "News Analysis Agent",
            AgentStage::QuantAnalysis => "Quantitative Analysis Agent",
            AgentStage::Reporting => "Reporting Agent",
        }
    }

    /// One-line description of the stage's job
    pub const fn description(self) -> &'static str {
        match self {
            AgentStage::DataFetch => "Fetches real-time prices for all assets in the portfolio.",
            AgentStage::NewsAnalysis => "Scrapes and analyzes recent news for top holdings.",
            AgentStage::QuantAnalysis => "Calculates key risk metrics (VaR, Beta, concentration).",
            AgentStage::Reporting => "Generates a coherent, natural language summary report.",
        }
    }
}

impl fmt::Display for AgentStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order() {
        for (i, stage) in AgentStage::ALL.iter().enumerate() {
            assert_eq!(stage.index(), i);
        }
        assert!(AgentStage::DataFetch < AgentStage::Reporting);
    }

    #[test]
    fn test_serde_name() {
        let json = serde_json::to_string(&AgentStage::NewsAnalysis).unwrap();
        assert_eq!(json, "\"news_analysis\"");
    }
}
