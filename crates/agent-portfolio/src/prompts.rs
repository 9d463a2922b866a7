//! Prompt templates for the two generation calls
//!
//! Templates are MiniJinja sources rendered against a serialisable context.
//! Undefined variables are an error, so a template/context mismatch fails
//! the stage instead of sending a half-filled prompt.

use crate::market::{HISTORICAL_CONTEXT, MarketSnapshot, TRACKED_TICKERS, format_usd, metric_lines};
use crate::model::{NewsItem, QuantMetrics, Sentiment};
use minijinja::{Environment, UndefinedBehavior, context};
use std::sync::LazyLock;

const NEWS_SENTIMENT_TEMPLATE: &str = r#"You are a financial news sentiment analysis agent. For a portfolio focused on tech stocks like {{ tickers | join(", ") }}, analyze the query: "{{ query }}". Generate {{ count }} recent, realistic-sounding news headlines related to these companies and the query. For each headline, provide a sentiment ({{ labels | join(", ") }}) and a brief justification."#;

const RISK_REPORT_TEMPLATE: &str = r#"You are an autonomous financial analyst agent generating a risk assessment report.
User Query: "{{ query }}"

Here is the data you have gathered from other specialized agents:

---
Real-Time Market Data (Simulated):
- Portfolio Value: {{ portfolio_value }}
- Day's Change: {{ day_change }}
- Top Holdings:
{% for holding in holdings %}  - {{ holding }}
{% endfor %}
---
News Sentiment Analysis:
{{ news_json }}

---
Quantitative Risk Metrics (Simulated):
{% for line in metrics %}- {{ line }}
{% endfor %}
---
Historical Context Analysis (Simulated from Vector DB):
- Finding: {{ historical_context }}

---
Your Task:
Based on all the information above, generate a concise yet comprehensive risk assessment report for the user. Structure the report with the following sections using markdown for formatting:
{% for section in sections %}{{ loop.index }}.  **{{ section.title }}:** {{ section.guidance }}
{% endfor %}
The tone should be professional, clear, and reassuring. Do not invent any new data. Return ONLY the markdown report.
"#;

/// A required report section and what it should cover
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct ReportSection {
    pub title: &'static str,
    pub guidance: &'static str,
}

/// Report sections, in the order the model must write them
pub const REPORT_SECTIONS: [ReportSection; 5] = [
    ReportSection {
        title: "Executive Summary",
        guidance: "A brief overview of the key findings.",
    },
    ReportSection {
        title: "Key Risk Exposures",
        guidance: "Detail the main risks based on the user's query and the data (e.g., tech sector volatility, concentration).",
    },
    ReportSection {
        title: "Quantitative Analysis",
        guidance: "Briefly explain the Beta and VaR metrics in simple terms.",
    },
    ReportSection {
        title: "Market Sentiment",
        guidance: "Summarize the findings from the news analysis.",
    },
    ReportSection {
        title: "Historical Context & Concluding Remarks",
        guidance: "Provide context and a final thought.",
    },
];

static PROMPT_ENV: LazyLock<Environment<'static>> = LazyLock::new(|| {
    let mut env = Environment::new();
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    env
});

/// Instruction for the news sentiment call
pub fn news_sentiment_prompt(query: &str, count: usize) -> Result<String, minijinja::Error> {
    PROMPT_ENV.render_str(
        NEWS_SENTIMENT_TEMPLATE,
        context! {
            query => query,
            count => count,
            tickers => TRACKED_TICKERS,
            labels => Sentiment::LABELS,
        },
    )
}

/// Instruction for the final report call
pub fn risk_report_prompt(
    query: &str,
    news: &[NewsItem],
    snapshot: &MarketSnapshot,
    metrics: &QuantMetrics,
) -> Result<String, minijinja::Error> {
    let news_json = serde_json::to_string_pretty(news).map_err(|e| {
        minijinja::Error::new(
            minijinja::ErrorKind::BadSerialization,
            format!("failed to serialize news items: {e}"),
        )
    })?;

    let holdings: Vec<String> = snapshot.holdings.iter().map(|h| h.summary()).collect();

    PROMPT_ENV.render_str(
        RISK_REPORT_TEMPLATE,
        context! {
            query => query,
            portfolio_value => format_usd(snapshot.portfolio_value, false),
            day_change => snapshot.day_change_summary(),
            holdings => holdings,
            news_json => news_json,
            metrics => metric_lines(metrics),
            historical_context => HISTORICAL_CONTEXT,
            sections => REPORT_SECTIONS,
        },
    )
}
