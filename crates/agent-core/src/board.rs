//! Per-run stage records
//!
//! An [`AgentBoard`] holds one [`AgentState`] per stage. The orchestrator
//! creates or resets it at the start of every run and applies transitions
//! through it, so every change is checked against the status state machine
//! and produces a [`StatusEvent`] for observers.

use crate::{AgentStage, AgentStatus, Error, Result, StatusEvent};
use serde::{Deserialize, Serialize};

/// Status record for one stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentState {
    pub stage: AgentStage,
    pub status: AgentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl AgentState {
    /// A fresh, idle record for `stage`
    pub fn idle(stage: AgentStage) -> Self {
        Self {
            stage,
            status: AgentStatus::Idle,
            message: None,
        }
    }
}

/// The four stage records of a run, indexed by [`AgentStage`]
///
/// Serialises as a list of records in stage order. Deserialising rejects
/// lists that are not exactly one record per stage in that order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<AgentState>", into = "Vec<AgentState>")]
pub struct AgentBoard {
    states: [AgentState; 4],
}

impl TryFrom<Vec<AgentState>> for AgentBoard {
    type Error = Error;

    fn try_from(states: Vec<AgentState>) -> Result<Self> {
        let found: Vec<AgentStage> = states.iter().map(|s| s.stage).collect();
        if found != AgentStage::ALL {
            return Err(Error::InvalidBoard(format!(
                "expected one record per stage in order, found {found:?}"
            )));
        }

        let states = <[AgentState; 4]>::try_from(states)
            .map_err(|_| Error::InvalidBoard("expected four stage records".to_string()))?;
        Ok(Self { states })
    }
}

impl From<AgentBoard> for Vec<AgentState> {
    fn from(board: AgentBoard) -> Self {
        board.states.into()
    }
}

impl Default for AgentBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentBoard {
    /// Create a board with every stage idle
    pub fn new() -> Self {
        Self {
            states: AgentStage::ALL.map(AgentState::idle),
        }
    }

    /// Discard all state from a previous run
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Record for a single stage
    pub fn get(&self, stage: AgentStage) -> &AgentState {
        &self.states[stage.index()]
    }

    /// Status of a single stage
    pub fn status(&self, stage: AgentStage) -> AgentStatus {
        self.get(stage).status
    }

    /// All records in stage order
    pub fn states(&self) -> &[AgentState] {
        &self.states
    }

    /// Apply a status change
    ///
    /// A change without a message keeps the stage's previous message.
    pub fn transition(
        &mut self,
        stage: AgentStage,
        status: AgentStatus,
        message: Option<String>,
    ) -> Result<StatusEvent> {
        let state = &mut self.states[stage.index()];
        if !state.status.can_transition_to(status) {
            return Err(Error::InvalidTransition {
                stage,
                from: state.status,
                to: status,
            });
        }

        state.status = status;
        if message.is_some() {
            state.message = message;
        }

        Ok(StatusEvent::new(stage, status, state.message.clone()))
    }

    /// Move a stage to `Working`
    pub fn start(&mut self, stage: AgentStage) -> Result<StatusEvent> {
        self.transition(stage, AgentStatus::Working, None)
    }

    /// Move a stage to `Completed` with a summary
    pub fn complete(&mut self, stage: AgentStage, summary: impl Into<String>) -> Result<StatusEvent> {
        self.transition(stage, AgentStatus::Completed, Some(summary.into()))
    }

    /// Move a stage to `Failed` with the error message
    pub fn fail(&mut self, stage: AgentStage, error: impl Into<String>) -> Result<StatusEvent> {
        self.transition(stage, AgentStatus::Failed, Some(error.into()))
    }

    /// The stage that failed in this run, if any
    pub fn failed_stage(&self) -> Option<AgentStage> {
        self.states
            .iter()
            .find(|s| s.status == AgentStatus::Failed)
            .map(|s| s.stage)
    }

    /// The stage currently working, if any
    pub fn current_stage(&self) -> Option<AgentStage> {
        self.states
            .iter()
            .find(|s| s.status == AgentStatus::Working)
            .map(|s| s.stage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_idle() {
        let board = AgentBoard::new();
        assert_eq!(board.states().len(), 4);
        for (state, stage) in board.states().iter().zip(AgentStage::ALL) {
            assert_eq!(state.stage, stage);
            assert_eq!(state.status, AgentStatus::Idle);
            assert!(state.message.is_none());
        }
        assert!(board.current_stage().is_none());
    }

    #[test]
    fn test_start_and_complete() {
        let mut board = AgentBoard::new();
        let event = board.start(AgentStage::DataFetch).unwrap();
        assert_eq!(event.status, AgentStatus::Working);
        assert_eq!(board.current_stage(), Some(AgentStage::DataFetch));

        let event = board.complete(AgentStage::DataFetch, "done").unwrap();
        assert_eq!(event.message.as_deref(), Some("done"));
        assert_eq!(board.status(AgentStage::DataFetch), AgentStatus::Completed);
        assert!(board.current_stage().is_none());
    }

    #[test]
    fn test_rejects_backwards_transition() {
        let mut board = AgentBoard::new();
        board.start(AgentStage::NewsAnalysis).unwrap();
        board.fail(AgentStage::NewsAnalysis, "boom").unwrap();

        let err = board.start(AgentStage::NewsAnalysis).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidTransition {
                stage: AgentStage::NewsAnalysis,
                from: AgentStatus::Failed,
                to: AgentStatus::Working,
            }
        );
        assert_eq!(board.failed_stage(), Some(AgentStage::NewsAnalysis));
    }

    #[test]
    fn test_rejects_skipping_working() {
        let mut board = AgentBoard::new();
        assert!(board.complete(AgentStage::Reporting, "early").is_err());
        assert_eq!(board.status(AgentStage::Reporting), AgentStatus::Idle);
    }

    #[test]
    fn test_message_kept_without_new_one() {
        let mut board = AgentBoard::new();
        board.start(AgentStage::QuantAnalysis).unwrap();
        board.complete(AgentStage::QuantAnalysis, "metrics").unwrap();
        assert_eq!(
            board.get(AgentStage::QuantAnalysis).message.as_deref(),
            Some("metrics")
        );
    }

    #[test]
    fn test_reset_clears_previous_run() {
        let mut board = AgentBoard::new();
        for stage in AgentStage::ALL {
            board.start(stage).unwrap();
            board.complete(stage, "ok").unwrap();
        }
        assert!(
            board
                .states()
                .iter()
                .all(|s| s.status == AgentStatus::Completed)
        );

        board.reset();
        assert_eq!(board, AgentBoard::new());
    }

    #[test]
    fn test_serde_keeps_stage_order() {
        let mut board = AgentBoard::new();
        board.start(AgentStage::DataFetch).unwrap();

        let json = serde_json::to_value(&board).unwrap();
        assert_eq!(json[0]["stage"], "data_fetch");
        assert_eq!(json[0]["status"], "working");

        let back: AgentBoard = serde_json::from_value(json).unwrap();
        assert_eq!(back, board);
    }

    #[test]
    fn test_deserialize_rejects_reordered_records() {
        let mut states = AgentBoard::new().states().to_vec();
        states.swap(0, 3);
        let json = serde_json::to_value(&states).unwrap();

        let err = serde_json::from_value::<AgentBoard>(json).unwrap_err();
        assert!(err.to_string().contains("one record per stage"));
    }

    #[test]
    fn test_deserialize_rejects_missing_records() {
        let board = AgentBoard::new();
        let states = &board.states()[..3];
        let json = serde_json::to_value(states).unwrap();
        assert!(serde_json::from_value::<AgentBoard>(json).is_err());
    }
}
