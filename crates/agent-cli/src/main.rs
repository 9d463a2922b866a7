//! Command-line front end for the portfolio risk agents
//!
//! # Usage
//!
//! ```bash
//! export GEMINI_API_KEY="your-key"
//!
//! cargo run --bin portfolio-agents -- "How exposed am I to a chip selloff?"
//! cargo run --bin portfolio-agents -- --format json
//! ```

mod render;

use agent_llm::providers::GeminiProvider;
use agent_llm::{LLMProvider, LazyProvider};
use agent_portfolio::{AgentPipeline, AnalysisResult, PipelineConfig, PipelineEvent};
use agent_utils::Config;
use anyhow::Context;
use clap::{Parser, ValueEnum};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info};

const DEFAULT_QUERY: &str = "Analyze my portfolio's exposure to tech sector volatility.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Status, report and tables for a terminal
    Markdown,
    /// The analysis result as JSON
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "portfolio-agents")]
#[command(about = "Multi-agent risk analysis for a simulated tech portfolio", long_about = None)]
struct Args {
    /// Question about the portfolio
    #[arg(default_value = DEFAULT_QUERY)]
    query: String,

    /// Gemini model (overrides GEMINI_MODEL)
    #[arg(short, long)]
    model: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Markdown)]
    format: OutputFormat,

    /// Simulated price-fetch latency in milliseconds
    #[arg(long)]
    data_fetch_delay_ms: Option<u64>,

    /// Simulated risk-calculation latency in milliseconds
    #[arg(long)]
    quant_delay_ms: Option<u64>,
}

impl Args {
    fn pipeline_config(&self) -> anyhow::Result<PipelineConfig> {
        let mut builder = PipelineConfig::builder().from_env_model();
        if let Some(model) = &self.model {
            builder = builder.model(model);
        }
        if let Some(ms) = self.data_fetch_delay_ms {
            builder = builder.data_fetch_delay(Duration::from_millis(ms));
        }
        if let Some(ms) = self.quant_delay_ms {
            builder = builder.quant_delay(Duration::from_millis(ms));
        }
        builder.build().context("invalid pipeline configuration")
    }
}

fn gemini_handle() -> LazyProvider {
    LazyProvider::new("gemini", || {
        let provider: Arc<dyn LLMProvider> = Arc::new(GeminiProvider::from_env()?);
        Ok(provider)
    })
}

fn print_result(
    result: &AnalysisResult,
    pipeline: &AgentPipeline,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(result)?);
        }
        OutputFormat::Markdown => {
            println!("{}\n", render::status_table(&pipeline.states()));
            println!("{}\n", result.report.trim_end());
            println!("{}\n", render::news_table(&result.news));
            println!("{}", render::metrics_table(&result.metrics));
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app_config = Config::from_env();
    agent_utils::init_from_config(&app_config);

    let args = Args::parse();
    let config = args.pipeline_config()?;
    info!(app = %app_config.app_name, model = %config.model, "Starting portfolio analysis");

    let provider: Arc<dyn LLMProvider> = Arc::new(gemini_handle());
    let pipeline = AgentPipeline::from_provider(provider, config);

    let (tx, mut rx) = mpsc::unbounded_channel();
    let printer = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            match event {
                PipelineEvent::Status(status) => eprintln!("{}", render::status_line(&status)),
                PipelineEvent::Completed(_) => debug!("Run completed"),
                PipelineEvent::Failed(message) => debug!(%message, "Run failed"),
            }
        }
    });

    let outcome = pipeline.run_with(&args.query, &tx).await;
    drop(tx);
    printer.await?;

    match outcome {
        Ok(result) => print_result(&result, &pipeline, args.format),
        Err(err) => {
            if pipeline.failed_stage().is_some() {
                eprintln!("{}", render::status_table(&pipeline.states()));
            }
            Err(err.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_args() {
        let args = Args::parse_from(["portfolio-agents"]);
        assert_eq!(args.query, DEFAULT_QUERY);
        assert_eq!(args.format, OutputFormat::Markdown);
        assert!(args.model.is_none());
    }

    #[test]
    fn test_args_override_config() {
        let args = Args::parse_from([
            "portfolio-agents",
            "Am I too concentrated?",
            "--model",
            "gemini-2.5-pro",
            "--format",
            "json",
            "--data-fetch-delay-ms",
            "0",
            "--quant-delay-ms",
            "10",
        ]);
        assert_eq!(args.query, "Am I too concentrated?");
        assert_eq!(args.format, OutputFormat::Json);

        let config = args.pipeline_config().unwrap();
        assert_eq!(config.model, "gemini-2.5-pro");
        assert_eq!(config.data_fetch_delay, Duration::ZERO);
        assert_eq!(config.quant_delay, Duration::from_millis(10));
    }

    #[test]
    fn test_gemini_handle_is_lazy() {
        let handle = gemini_handle();
        assert!(!handle.is_initialized());
        assert_eq!(handle.name(), "gemini");
    }
}
