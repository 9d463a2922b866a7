//! Terminal rendering for status cards and result tables

use agent_core::{AgentStage, AgentState, AgentStatus, StatusEvent};
use agent_portfolio::market::format_usd;
use agent_portfolio::{NewsItem, QuantMetrics, Sentiment};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, ContentArrangement, Table};

/// One-line progress card for a status change
pub fn status_line(event: &StatusEvent) -> String {
    let mut line = format!(
        "[{}/{}] {} {}",
        event.stage.index() + 1,
        AgentStage::ALL.len(),
        status_marker(event.status),
        event.stage.display_name(),
    );
    let detail = if event.status.is_terminal() {
        event.message.as_deref()
    } else if event.status == AgentStatus::Working {
        Some(event.stage.description())
    } else {
        None
    };
    if let Some(detail) = detail {
        line.push_str(": ");
        line.push_str(detail);
    }
    line
}

fn status_marker(status: AgentStatus) -> &'static str {
    match status {
        AgentStatus::Idle => "·",
        AgentStatus::Working => "…",
        AgentStatus::Completed => "✓",
        AgentStatus::Failed => "✗",
    }
}

fn status_color(status: AgentStatus) -> Color {
    match status {
        AgentStatus::Idle => Color::Grey,
        AgentStatus::Working => Color::Yellow,
        AgentStatus::Completed => Color::Green,
        AgentStatus::Failed => Color::Red,
    }
}

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

/// Final status of every stage
pub fn status_table(states: &[AgentState]) -> Table {
    let mut table = new_table(vec!["Agent", "Status", "Details"]);
    for state in states {
        table.add_row(vec![
            Cell::new(state.stage.display_name()),
            Cell::new(state.status).fg(status_color(state.status)),
            Cell::new(state.message.as_deref().unwrap_or("")),
        ]);
    }
    table
}

fn sentiment_color(sentiment: Sentiment) -> Color {
    match sentiment {
        Sentiment::Positive => Color::Green,
        Sentiment::Neutral => Color::Yellow,
        Sentiment::Negative => Color::Red,
    }
}

/// Sentiment-tagged headlines
pub fn news_table(news: &[NewsItem]) -> Table {
    let mut table = new_table(vec!["Headline", "Sentiment", "Justification"]);
    for item in news {
        table.add_row(vec![
            Cell::new(&item.headline),
            Cell::new(item.sentiment).fg(sentiment_color(item.sentiment)),
            Cell::new(&item.justification),
        ]);
    }
    table
}

/// Key risk metrics
pub fn metrics_table(metrics: &QuantMetrics) -> Table {
    let mut table = new_table(vec!["Metric", "Value"]);
    table
        .add_row(vec!["Portfolio Beta".to_string(), format!("{:.2}", metrics.beta)])
        .add_row(vec![
            "VaR (95%, 1 day)".to_string(),
            format_usd(metrics.value_at_risk, false),
        ])
        .add_row(vec![
            "Tech Concentration".to_string(),
            format!("{:.0}%", metrics.concentration * 100.0),
        ]);
    table
}
