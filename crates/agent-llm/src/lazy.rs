//! Lazily initialised provider handle
//!
//! [`LazyProvider`] wraps a provider factory. The factory runs on the first
//! completion request and the resulting provider is reused for every later
//! call. If the factory fails (typically a missing API key) the error is
//! returned to that caller and the handle stays uninitialised, so a fixed
//! environment is picked up on the next call.

use crate::{CompletionRequest, CompletionResponse, LLMProvider, Result};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, info};

type ProviderFactory = dyn Fn() -> Result<Arc<dyn LLMProvider>> + Send + Sync;

/// Provider handle that builds its inner provider on first use
pub struct LazyProvider {
    name: String,
    factory: Box<ProviderFactory>,
    inner: OnceCell<Arc<dyn LLMProvider>>,
}

impl LazyProvider {
    /// Create a handle around a provider factory
    ///
    /// # Example
    ///
    /// ```
    /// use agent_llm::LazyProvider;
    /// use agent_llm::LLMError;
    ///
    /// let handle = LazyProvider::new("unconfigured", || {
    ///     Err(LLMError::ConfigurationError("no key".to_string()))
    /// });
    /// assert!(!handle.is_initialized());
    /// ```
    pub fn new<F>(name: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> Result<Arc<dyn LLMProvider>> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            factory: Box::new(factory),
            inner: OnceCell::new(),
        }
    }

    /// Create a handle that is already initialised
    pub fn ready(provider: Arc<dyn LLMProvider>) -> Self {
        let name = provider.name().to_string();
        let shared = Arc::clone(&provider);
        Self {
            name,
            factory: Box::new(move || Ok(Arc::clone(&shared))),
            inner: OnceCell::new_with(Some(provider)),
        }
    }

    /// Build the inner provider now instead of on first request
    pub async fn initialize(&self) -> Result<&Arc<dyn LLMProvider>> {
        self.inner
            .get_or_try_init(|| async {
                info!(provider = %self.name, "Initializing LLM provider");
                (self.factory)()
            })
            .await
    }

    /// Whether the inner provider has been built
    pub fn is_initialized(&self) -> bool {
        self.inner.initialized()
    }
}

#[async_trait]
impl LLMProvider for LazyProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        let provider = self.initialize().await?;
        debug!(provider = %self.name, "Delegating completion");
        provider.complete(request).await
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LLMError, Message, StopReason, TokenUsage};
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    struct EchoProvider;

    #[async_trait]
    impl LLMProvider for EchoProvider {
        async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
            let text = request.messages.last().map(|m| m.content.clone()).unwrap_or_default();
            Ok(CompletionResponse {
                message: Message::assistant(text),
                stop_reason: StopReason::EndTurn,
                usage: TokenUsage::default(),
            })
        }

        fn name(&self) -> &str {
            "echo"
        }
    }

    fn request(text: &str) -> CompletionRequest {
        CompletionRequest::builder("test").prompt(text).build()
    }

    #[tokio::test]
    async fn test_initializes_once() {
        let builds = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&builds);
        let handle = LazyProvider::new("echo", move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(Arc::new(EchoProvider) as Arc<dyn LLMProvider>)
        });

        assert!(!handle.is_initialized());
        assert_eq!(handle.complete(request("one")).await.unwrap().text(), "one");
        assert_eq!(handle.complete(request("two")).await.unwrap().text(), "two");
        assert!(handle.is_initialized());
        assert_eq!(builds.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_missing_credentials_surface_on_first_use() {
        let configured = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&configured);
        let handle = LazyProvider::new("echo", move || {
            if flag.load(Ordering::SeqCst) {
                Ok(Arc::new(EchoProvider) as Arc<dyn LLMProvider>)
            } else {
                Err(LLMError::ConfigurationError("API key not set".to_string()))
            }
        });

        let err = handle.complete(request("x")).await.unwrap_err();
        assert!(err.is_configuration());
        assert!(!handle.is_initialized());

        // Reconfiguring before the next call recovers
        configured.store(true, Ordering::SeqCst);
        assert!(handle.complete(request("y")).await.is_ok());
        assert!(handle.is_initialized());
    }

    #[tokio::test]
    async fn test_ready_handle() {
        let handle = LazyProvider::ready(Arc::new(EchoProvider));
        assert!(handle.is_initialized());
        assert_eq!(handle.name(), "echo");
        assert_eq!(handle.complete(request("hi")).await.unwrap().text(), "hi");
    }
}
