//! Shared fixtures for unit tests

use crate::model::{NewsItem, Sentiment};
use agent_llm::{
    CompletionRequest, CompletionResponse, LLMError, LLMProvider, Message, StopReason, TokenUsage,
};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

pub const QUERY: &str = "Analyze my portfolio's exposure to tech sector volatility.";

pub fn sample_news() -> Vec<NewsItem> {
    vec![
        NewsItem {
            headline: "NVIDIA extends rally on data-center demand".to_string(),
            sentiment: Sentiment::Positive,
            justification: "Guidance raised for the third straight quarter.".to_string(),
        },
        NewsItem {
            headline: "Regulators widen probe into cloud pricing".to_string(),
            sentiment: Sentiment::Negative,
            justification: "Potential fines for MSFT and AMZN.".to_string(),
        },
        NewsItem {
            headline: "Apple holds developer conference dates".to_string(),
            sentiment: Sentiment::Neutral,
            justification: "Routine scheduling news.".to_string(),
        },
    ]
}

/// Provider that replays scripted replies and records every request
#[derive(Default)]
pub struct ScriptedProvider {
    replies: Mutex<VecDeque<Result<String, LLMError>>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedProvider {
    pub fn replying(replies: Vec<Result<String, LLMError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LLMProvider for ScriptedProvider {
    async fn complete(&self, request: CompletionRequest) -> agent_llm::Result<CompletionResponse> {
        self.requests.lock().unwrap().push(request);
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(LLMError::RequestFailed("no scripted reply".to_string())))?;

        Ok(CompletionResponse {
            message: Message::assistant(reply),
            stop_reason: StopReason::EndTurn,
            usage: TokenUsage::default(),
        })
    }

    fn name(&self) -> &str {
        "scripted"
    }
}
