//! Status change notifications

use crate::{AgentStage, AgentStatus};
use serde::{Deserialize, Serialize};

/// A single stage status change, emitted as it happens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEvent {
    pub stage: AgentStage,
    pub status: AgentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl StatusEvent {
    pub fn new(stage: AgentStage, status: AgentStatus, message: Option<String>) -> Self {
        Self {
            stage,
            status,
            message,
        }
    }
}
