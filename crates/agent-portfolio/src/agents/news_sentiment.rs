//! News sentiment agent
//!
//! Asks the model for a fixed number of headlines about the tracked
//! holdings, constrained by a JSON response schema, and validates the
//! payload locally before handing it on.

use agent_llm::{CompletionRequest, LLMProvider, ResponseSchema, schema};
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::config::PipelineConfig;
use crate::error::GenerationError;
use crate::model::{NewsItem, Sentiment};
use crate::prompts;

/// Produces sentiment-tagged news items for a query
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NewsAnalyst: Send + Sync {
    async fn generate(&self, query: &str) -> Result<Vec<NewsItem>, GenerationError>;
}

/// [`NewsAnalyst`] backed by an LLM provider
pub struct NewsSentimentGenerator {
    provider: Arc<dyn LLMProvider>,
    config: Arc<PipelineConfig>,
}

impl NewsSentimentGenerator {
    pub fn new(provider: Arc<dyn LLMProvider>, config: Arc<PipelineConfig>) -> Self {
        Self { provider, config }
    }

    /// Schema sent with the request: an array of headline objects
    pub fn response_schema() -> ResponseSchema {
        let item = schema::object(
            json!({
                "headline": schema::string(
                    "A realistic-sounding news headline related to the companies or query.",
                ),
                "sentiment": schema::string_enum(
                    "The sentiment of the headline. Must be 'Positive', 'Neutral', or 'Negative'.",
                    &Sentiment::LABELS,
                ),
                "justification": schema::string(
                    "A brief justification for the assigned sentiment.",
                ),
            }),
            &["headline", "sentiment", "justification"],
        );
        ResponseSchema::new(schema::array(item))
    }

    fn build_request(&self, query: &str) -> Result<CompletionRequest, GenerationError> {
        let prompt = prompts::news_sentiment_prompt(query, self.config.news_item_count)?;

        let mut builder = CompletionRequest::builder(&self.config.model)
            .prompt(prompt)
            .max_tokens(self.config.max_tokens)
            .response_schema(Self::response_schema());
        if let Some(temperature) = self.config.temperature {
            builder = builder.temperature(temperature);
        }
        Ok(builder.build())
    }
}

#[async_trait]
impl NewsAnalyst for NewsSentimentGenerator {
    #[instrument(skip(self), fields(model = %self.config.model))]
    async fn generate(&self, query: &str) -> Result<Vec<NewsItem>, GenerationError> {
        let request = self.build_request(query)?;
        let response = self.provider.complete(request).await.map_err(|e| {
            warn!("News sentiment request failed: {}", e);
            GenerationError::from(e)
        })?;
        debug!(tokens = response.usage.total(), "News sentiment response received");

        let items = parse_news_items(response.text())?;
        if items.len() != self.config.news_item_count {
            warn!(
                expected = self.config.news_item_count,
                received = items.len(),
                "Model returned an unexpected number of news items"
            );
        }
        info!(count = items.len(), "Parsed news sentiment");
        Ok(items)
    }
}

/// Parse the model's JSON payload into news items
///
/// Accepts an optional markdown code fence around the JSON. The order of
/// the items is preserved.
pub fn parse_news_items(raw: &str) -> Result<Vec<NewsItem>, GenerationError> {
    let payload = strip_code_fence(raw.trim());
    if payload.is_empty() {
        return Err(GenerationError::MalformedResponse(
            "empty news payload".to_string(),
        ));
    }

    serde_json::from_str(payload)
        .map_err(|e| GenerationError::MalformedResponse(format!("invalid news payload: {e}")))
}

fn strip_code_fence(text: &str) -> &str {
    let Some(body) = text.strip_prefix("```") else {
        return text;
    };
    let body = body.strip_prefix("json").unwrap_or(body);
    body.strip_suffix("```").unwrap_or(body).trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{QUERY, ScriptedProvider, sample_news};
    use agent_llm::LLMError;
    use tokio_test::{assert_err, assert_ok};

    fn generator(provider: Arc<ScriptedProvider>) -> NewsSentimentGenerator {
        NewsSentimentGenerator::new(provider, Arc::new(PipelineConfig::default()))
    }

    #[tokio::test]
    async fn test_generate_parses_items_in_order() {
        let payload = serde_json::to_string(&sample_news()).unwrap();
        let provider = Arc::new(ScriptedProvider::replying(vec![Ok(payload)]));

        let items = assert_ok!(generator(Arc::clone(&provider)).generate(QUERY).await);
        assert_eq!(items, sample_news());

        let requests = provider.requests();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.model, "gemini-2.5-flash");
        assert_eq!(request.response_schema, Some(NewsSentimentGenerator::response_schema()));
        assert!(request.messages[0].content.contains(QUERY));
    }

    #[tokio::test]
    async fn test_transport_error_keeps_message() {
        let provider = Arc::new(ScriptedProvider::replying(vec![Err(
            LLMError::RateLimitExceeded("rate limited".to_string()),
        )]));

        let err = assert_err!(generator(provider).generate(QUERY).await);
        assert!(matches!(err, GenerationError::Transport(_)));
        assert!(err.to_string().contains("rate limited"));
    }

    #[tokio::test]
    async fn test_missing_credentials() {
        let provider = Arc::new(ScriptedProvider::replying(vec![Err(
            LLMError::ConfigurationError("API key not set".to_string()),
        )]));

        let err = assert_err!(generator(provider).generate(QUERY).await);
        assert!(matches!(err, GenerationError::Configuration(_)));
    }

    #[tokio::test]
    async fn test_non_json_reply_is_malformed() {
        let provider = Arc::new(ScriptedProvider::replying(vec![Ok(
            "Here are some headlines!".to_string(),
        )]));

        let err = assert_err!(generator(provider).generate(QUERY).await);
        assert!(matches!(err, GenerationError::MalformedResponse(_)));
    }

    #[test]
    fn test_schema_shape() {
        let schema = NewsSentimentGenerator::response_schema();
        let value = schema.as_value();
        assert_eq!(value["type"], "array");
        assert_eq!(
            value["items"]["required"],
            json!(["headline", "sentiment", "justification"])
        );
        assert_eq!(
            value["items"]["properties"]["sentiment"]["enum"],
            json!(["Positive", "Neutral", "Negative"])
        );
    }

    #[test]
    fn test_parse_missing_field() {
        let raw = r#"[{"headline": "h", "sentiment": "Positive"}]"#;
        let err = parse_news_items(raw).unwrap_err();
        assert!(err.to_string().contains("justification"));
    }

    #[test]
    fn test_parse_code_fence() {
        let raw = "```json\n[{\"headline\": \"h\", \"sentiment\": \"neutral\", \"justification\": \"j\"}]\n```";
        let items = parse_news_items(raw).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].sentiment, Sentiment::Neutral);
    }

    #[test]
    fn test_parse_rejects_object_and_blank() {
        assert!(parse_news_items(r#"{"headline": "h"}"#).is_err());
        assert!(parse_news_items("   ").is_err());
    }
}
