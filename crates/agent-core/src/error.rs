//! Error types for agent-core

use crate::{AgentStage, AgentStatus};
use thiserror::Error;

/// Result type alias for agent-core
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for stage state operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A status change that does not move forward along the state machine
    #[error("Invalid transition for {stage}: {from} -> {to}")]
    InvalidTransition {
        stage: AgentStage,
        from: AgentStatus,
        to: AgentStatus,
    },

    /// Stage records that do not form a valid board
    #[error("Invalid board: {0}")]
    InvalidBoard(String),
}
