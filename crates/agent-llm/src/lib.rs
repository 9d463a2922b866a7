//! LLM provider abstraction layer for portfolio-agents
//!
//! This crate is the model-invocation boundary used by the analysis
//! generators. It includes:
//!
//! - Message types for LLM communication
//! - Completion request/response types, including an optional structured
//!   output schema
//! - Schema builders for constrained JSON responses
//! - The provider trait and a lazily initialised provider handle
//! - Concrete provider implementations (behind feature flags)

pub mod completion;
pub mod error;
pub mod lazy;
pub mod messages;
pub mod provider;
pub mod schema;

// Re-export main types
pub use completion::{CompletionRequest, CompletionResponse, StopReason, TokenUsage};
pub use error::{LLMError, Result};
pub use lazy::LazyProvider;
pub use messages::{Message, Role};
pub use provider::LLMProvider;
pub use schema::ResponseSchema;

// Provider implementations (feature-gated)
#[cfg(feature = "gemini")]
pub mod providers;
