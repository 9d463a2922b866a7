//! Error types for the analysis pipeline

use agent_core::AgentStage;
use agent_llm::LLMError;
use thiserror::Error;

/// Errors raised by the news and report generators
#[derive(Debug, Error)]
pub enum GenerationError {
    /// Missing or invalid credentials, raised on the first model call
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Network or API failure; the transport's message is kept as is
    #[error("{0}")]
    Transport(String),

    /// The model answered, but not in the expected shape
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Prompt template failed to render
    #[error("Prompt rendering failed: {0}")]
    Prompt(#[from] minijinja::Error),
}

impl From<LLMError> for GenerationError {
    fn from(err: LLMError) -> Self {
        match err {
            LLMError::ConfigurationError(msg) => GenerationError::Configuration(msg),
            other => GenerationError::Transport(other.to_string()),
        }
    }
}

/// Errors surfaced by [`AgentPipeline::run`](crate::AgentPipeline::run)
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Empty or whitespace-only query
    #[error("Please enter a valid query.")]
    InvalidInput,

    /// Another run on the same pipeline is still in flight
    #[error("An analysis is already running")]
    AlreadyRunning,

    /// A stage failed and the run was aborted
    #[error("Simulation failed: {source}")]
    StageFailed {
        stage: AgentStage,
        source: GenerationError,
    },

    /// Invalid pipeline configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// A stage status change broke the state machine
    #[error("Simulation failed: {0}")]
    State(#[from] agent_core::Error),
}

impl PipelineError {
    /// The stage that failed, for stage failures
    pub fn failed_stage(&self) -> Option<AgentStage> {
        match self {
            PipelineError::StageFailed { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;
