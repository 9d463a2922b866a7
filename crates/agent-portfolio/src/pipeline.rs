//! Four-stage analysis pipeline
//!
//! [`AgentPipeline`] runs the stages strictly in order. Every status change
//! goes through the [`AgentBoard`] state machine and is handed to the run's
//! observer before the stage's work starts and right after it settles. The
//! first failing stage aborts the run.

use agent_core::{AgentBoard, AgentStage, AgentState, AgentStatus, StatusEvent};
use agent_llm::LLMProvider;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::{info, instrument, warn};

use crate::agents::{NewsAnalyst, NewsSentimentGenerator, ReportGenerator, ReportWriter};
use crate::config::PipelineConfig;
use crate::error::{GenerationError, PipelineError, Result};
use crate::market::MarketSnapshot;
use crate::model::{AnalysisResult, QuantMetrics};
use crate::observer::{AnalysisObserver, NoopObserver};

/// Orchestrates the data fetch, news, quant and reporting stages
pub struct AgentPipeline {
    news: Arc<dyn NewsAnalyst>,
    reporter: Arc<dyn ReportWriter>,
    config: Arc<PipelineConfig>,
    board: Mutex<AgentBoard>,
    running: AtomicBool,
}

impl AgentPipeline {
    /// Create a pipeline from explicit agents
    pub fn new(
        news: Arc<dyn NewsAnalyst>,
        reporter: Arc<dyn ReportWriter>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            news,
            reporter,
            config: Arc::new(config),
            board: Mutex::new(AgentBoard::new()),
            running: AtomicBool::new(false),
        }
    }

    /// Create a pipeline whose agents share one model provider
    pub fn from_provider(provider: Arc<dyn LLMProvider>, config: PipelineConfig) -> Self {
        let config = Arc::new(config);
        let news = NewsSentimentGenerator::new(Arc::clone(&provider), Arc::clone(&config));
        let reporter = ReportGenerator::new(provider, Arc::clone(&config));

        Self {
            news: Arc::new(news),
            reporter: Arc::new(reporter),
            config,
            board: Mutex::new(AgentBoard::new()),
            running: AtomicBool::new(false),
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Snapshot of the four stage records, in stage order
    pub fn states(&self) -> Vec<AgentState> {
        self.lock_board().states().to_vec()
    }

    pub fn status(&self, stage: AgentStage) -> AgentStatus {
        self.lock_board().status(stage)
    }

    /// Stage that failed in the latest run
    pub fn failed_stage(&self) -> Option<AgentStage> {
        self.lock_board().failed_stage()
    }

    /// Stage currently working, if a run is in flight
    pub fn current_stage(&self) -> Option<AgentStage> {
        self.lock_board().current_stage()
    }

    /// True while a run holds the pipeline
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Run the analysis without an observer
    pub async fn run(&self, query: &str) -> Result<AnalysisResult> {
        self.run_with(query, &NoopObserver).await
    }

    /// Run the analysis, reporting progress to `observer`
    ///
    /// # Errors
    ///
    /// - [`PipelineError::InvalidInput`] for a blank query, before any state
    ///   is touched
    /// - [`PipelineError::AlreadyRunning`] while another run is in flight
    /// - [`PipelineError::StageFailed`] when a stage fails; later stages stay
    ///   idle
    #[instrument(skip(self, observer))]
    pub async fn run_with(
        &self,
        query: &str,
        observer: &dyn AnalysisObserver,
    ) -> Result<AnalysisResult> {
        let outcome = self.try_run(query, observer).await;
        match &outcome {
            Ok(result) => observer.on_result(result),
            Err(err) => observer.on_error(&err.to_string()),
        }
        outcome
    }

    async fn try_run(&self, query: &str, observer: &dyn AnalysisObserver) -> Result<AnalysisResult> {
        if query.trim().is_empty() {
            return Err(PipelineError::InvalidInput);
        }

        let _guard = RunGuard::acquire(&self.running).ok_or(PipelineError::AlreadyRunning)?;
        self.lock_board().reset();
        info!("Starting portfolio analysis");

        self.run_stage(
            AgentStage::DataFetch,
            observer,
            || async {
                simulate_latency(self.config.data_fetch_delay).await;
                Ok::<_, GenerationError>(MarketSnapshot::simulated())
            },
            |snapshot| {
                format!(
                    "Fetched real-time prices for {} holdings.",
                    snapshot.holdings.len()
                )
            },
        )
        .await?;

        let news = self
            .run_stage(
                AgentStage::NewsAnalysis,
                observer,
                || self.news.generate(query),
                |news| format!("Analyzed sentiment for {} news items.", news.len()),
            )
            .await?;

        let metrics = self
            .run_stage(
                AgentStage::QuantAnalysis,
                observer,
                || async {
                    simulate_latency(self.config.quant_delay).await;
                    Ok::<_, GenerationError>(QuantMetrics::SIMULATED)
                },
                |_| "Calculated VaR, Beta, and concentration.".to_string(),
            )
            .await?;

        let report = self
            .run_stage(
                AgentStage::Reporting,
                observer,
                || self.reporter.generate(query, &news),
                |_| "Final report generated.".to_string(),
            )
            .await?;

        info!("Portfolio analysis completed");
        Ok(AnalysisResult {
            report,
            news,
            metrics,
        })
    }

    /// Run one stage: `Working`, then the work, then `Completed` or `Failed`
    async fn run_stage<T, W, Fut, S>(
        &self,
        stage: AgentStage,
        observer: &dyn AnalysisObserver,
        work: W,
        summary: S,
    ) -> Result<T>
    where
        W: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<T, GenerationError>>,
        S: FnOnce(&T) -> String,
    {
        self.transition(observer, |board| board.start(stage))?;
        info!(stage = %stage, "Stage started");

        match work().await {
            Ok(value) => {
                self.transition(observer, |board| board.complete(stage, summary(&value)))?;
                info!(stage = %stage, "Stage completed");
                Ok(value)
            }
            Err(source) => {
                warn!(stage = %stage, error = %source, "Stage failed");
                self.transition(observer, |board| board.fail(stage, source.to_string()))?;
                Err(PipelineError::StageFailed { stage, source })
            }
        }
    }

    fn transition(
        &self,
        observer: &dyn AnalysisObserver,
        apply: impl FnOnce(&mut AgentBoard) -> agent_core::Result<StatusEvent>,
    ) -> Result<()> {
        let event = apply(&mut self.lock_board())?;
        observer.on_status_change(&event);
        Ok(())
    }

    fn lock_board(&self) -> MutexGuard<'_, AgentBoard> {
        self.board.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

async fn simulate_latency(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

/// Holds the running flag for the lifetime of a run
struct RunGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> RunGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
