//! Stage and status model for the portfolio agents pipeline
//!
//! This crate defines the four ordered agent stages, their status state
//! machine, and the per-run board that tracks them. It has no knowledge of
//! LLMs or of the analysis payloads; the orchestrator in `agent-portfolio`
//! drives it.

pub mod board;
pub mod error;
pub mod event;
pub mod stage;
pub mod status;

pub use board::{AgentBoard, AgentState};
pub use error::{Error, Result};
pub use event::StatusEvent;
pub use stage::AgentStage;
pub use status::AgentStatus;
