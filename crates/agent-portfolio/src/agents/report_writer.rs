//! Report writer agent

use agent_llm::{CompletionRequest, LLMProvider};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::config::PipelineConfig;
use crate::error::GenerationError;
use crate::market::MarketSnapshot;
use crate::model::{NewsItem, QuantMetrics};
use crate::prompts;

/// Writes the final markdown risk report
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReportWriter: Send + Sync {
    async fn generate(&self, query: &str, news: &[NewsItem]) -> Result<String, GenerationError>;
}

/// [`ReportWriter`] backed by an LLM provider
pub struct ReportGenerator {
    provider: Arc<dyn LLMProvider>,
    config: Arc<PipelineConfig>,
}

impl ReportGenerator {
    pub fn new(provider: Arc<dyn LLMProvider>, config: Arc<PipelineConfig>) -> Self {
        Self { provider, config }
    }

    fn build_request(
        &self,
        query: &str,
        news: &[NewsItem],
    ) -> Result<CompletionRequest, GenerationError> {
        let prompt = prompts::risk_report_prompt(
            query,
            news,
            &MarketSnapshot::simulated(),
            &QuantMetrics::SIMULATED,
        )?;

        let mut builder = CompletionRequest::builder(&self.config.model)
            .prompt(prompt)
            .max_tokens(self.config.max_tokens);
        if let Some(temperature) = self.config.temperature {
            builder = builder.temperature(temperature);
        }
        Ok(builder.build())
    }
}

#[async_trait]
impl ReportWriter for ReportGenerator {
    #[instrument(skip(self, news), fields(model = %self.config.model, news = news.len()))]
    async fn generate(&self, query: &str, news: &[NewsItem]) -> Result<String, GenerationError> {
        let request = self.build_request(query, news)?;
        let response = self.provider.complete(request).await.map_err(|e| {
            warn!("Report request failed: {}", e);
            GenerationError::from(e)
        })?;
        debug!(tokens = response.usage.total(), "Report response received");

        let report = response.text();
        if report.trim().is_empty() {
            return Err(GenerationError::MalformedResponse("empty report".to_string()));
        }

        info!(chars = report.len(), "Report generated");
        Ok(report.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{QUERY, ScriptedProvider, sample_news};
    use agent_llm::LLMError;
    use tokio_test::{assert_err, assert_ok};

    const REPORT: &str = "## Executive Summary\n\nTech exposure is elevated.\n";

    fn writer(provider: Arc<ScriptedProvider>) -> ReportGenerator {
        ReportGenerator::new(provider, Arc::new(PipelineConfig::default()))
    }

    #[tokio::test]
    async fn test_report_returned_unmodified() {
        let provider = Arc::new(ScriptedProvider::replying(vec![Ok(REPORT.to_string())]));

        let report = assert_ok!(writer(Arc::clone(&provider)).generate(QUERY, &sample_news()).await);
        assert_eq!(report, REPORT);

        let requests = provider.requests();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].response_schema.is_none());

        let prompt = &requests[0].messages[0].content;
        assert!(prompt.contains(QUERY));
        assert!(prompt.contains("NVIDIA extends rally on data-center demand"));
        assert!(prompt.contains("$1,250,000"));
    }

    #[tokio::test]
    async fn test_blank_report_is_malformed() {
        let provider = Arc::new(ScriptedProvider::replying(vec![Ok(" \n\t".to_string())]));

        let err = assert_err!(writer(provider).generate(QUERY, &sample_news()).await);
        assert!(matches!(err, GenerationError::MalformedResponse(ref msg) if msg == "empty report"));
    }

    #[tokio::test]
    async fn test_transport_failure() {
        let provider = Arc::new(ScriptedProvider::replying(vec![Err(LLMError::RequestFailed(
            "connection reset".to_string(),
        ))]));

        let err = assert_err!(writer(provider).generate(QUERY, &[]).await);
        assert!(matches!(err, GenerationError::Transport(_)));
        assert!(err.to_string().contains("connection reset"));
    }

    #[tokio::test]
    async fn test_temperature_forwarded() {
        let provider = Arc::new(ScriptedProvider::replying(vec![Ok(REPORT.to_string())]));
        let config = PipelineConfig::builder().temperature(0.2).build().unwrap();
        let writer = ReportGenerator::new(provider.clone(), Arc::new(config));

        assert_ok!(writer.generate(QUERY, &sample_news()).await);
        assert_eq!(provider.requests()[0].temperature, Some(0.2));
    }
}
