//! Portfolio risk analysis pipeline
//!
//! Four agents run in a fixed order against a simulated tech portfolio:
//!
//! - **Data fetch**: simulated price snapshot for the five holdings
//! - **News analysis**: model-generated headlines with structured sentiment
//! - **Quant analysis**: fixed Beta, VaR and concentration figures
//! - **Reporting**: model-written markdown risk report
//!
//! # Example
//!
//! ```rust,ignore
//! use agent_llm::providers::GeminiProvider;
//! use agent_portfolio::{AgentPipeline, PipelineConfig};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let provider = Arc::new(GeminiProvider::from_env()?);
//!     let pipeline = AgentPipeline::from_provider(provider, PipelineConfig::default());
//!
//!     let result = pipeline.run("How exposed am I to tech volatility?").await?;
//!     println!("{}", result.report);
//!     Ok(())
//! }
//! ```

pub mod agents;
pub mod config;
pub mod error;
pub mod market;
pub mod model;
pub mod observer;
pub mod pipeline;
pub mod prompts;

#[cfg(test)]
mod test_support;

pub use agents::{NewsAnalyst, NewsSentimentGenerator, ReportGenerator, ReportWriter};
pub use config::{DEFAULT_MODEL, PipelineConfig, PipelineConfigBuilder};
pub use error::{GenerationError, PipelineError, Result};
pub use market::{Holding, MarketSnapshot};
pub use model::{AnalysisResult, NewsItem, QuantMetrics, Sentiment};
pub use observer::{AnalysisObserver, NoopObserver, PipelineEvent, RecordingObserver};
pub use pipeline::AgentPipeline;

pub use agent_core::{AgentStage, AgentState, AgentStatus, StatusEvent};
