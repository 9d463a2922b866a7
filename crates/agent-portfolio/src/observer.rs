//! Per-run observers for pipeline progress

use agent_core::StatusEvent;
use std::sync::{Mutex, PoisonError};
use tokio::sync::mpsc::UnboundedSender;

use crate::model::AnalysisResult;

/// Everything an observer can be told about a run
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineEvent {
    Status(StatusEvent),
    Completed(AnalysisResult),
    Failed(String),
}

/// Receives status transitions and the outcome of a run
///
/// Status changes arrive in order, before a stage's work starts and right
/// after it settles.
pub trait AnalysisObserver: Send + Sync {
    fn on_status_change(&self, event: &StatusEvent);

    fn on_result(&self, _result: &AnalysisResult) {}

    fn on_error(&self, _message: &str) {}
}

/// Observer that ignores everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl AnalysisObserver for NoopObserver {
    fn on_status_change(&self, _event: &StatusEvent) {}
}

/// Observer that keeps every event in memory
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<PipelineEvent>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events received so far
    pub fn events(&self) -> Vec<PipelineEvent> {
        self.lock().clone()
    }

    /// Only the status transitions
    pub fn status_events(&self) -> Vec<StatusEvent> {
        self.lock()
            .iter()
            .filter_map(|event| match event {
                PipelineEvent::Status(status) => Some(status.clone()),
                _ => None,
            })
            .collect()
    }

    fn push(&self, event: PipelineEvent) {
        self.lock().push(event);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<PipelineEvent>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl AnalysisObserver for RecordingObserver {
    fn on_status_change(&self, event: &StatusEvent) {
        self.push(PipelineEvent::Status(event.clone()));
    }

    fn on_result(&self, result: &AnalysisResult) {
        self.push(PipelineEvent::Completed(result.clone()));
    }

    fn on_error(&self, message: &str) {
        self.push(PipelineEvent::Failed(message.to_string()));
    }
}

// A closed receiver just means nobody is watching any more.
impl AnalysisObserver for UnboundedSender<PipelineEvent> {
    fn on_status_change(&self, event: &StatusEvent) {
        let _ = self.send(PipelineEvent::Status(event.clone()));
    }

    fn on_result(&self, result: &AnalysisResult) {
        let _ = self.send(PipelineEvent::Completed(result.clone()));
    }

    fn on_error(&self, message: &str) {
        let _ = self.send(PipelineEvent::Failed(message.to_string()));
    }
}
