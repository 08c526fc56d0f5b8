//! Background dispatch of transcription simulations.
//!
//! Every triggered transcription becomes one task on a shared
//! [`TaskTracker`]. The trigger path returns as soon as the task is
//! spawned; the returned [`SimulationHandle`] may be awaited (tests,
//! tooling) or dropped, which detaches the task without cancelling it.
//! There is no cancellation: at shutdown the dispatcher is drained.

use std::sync::Arc;
use std::time::Duration;

use intervu_core::error::CoreError;
use intervu_core::types::InterviewId;
use tokio::task::JoinHandle;
use tokio_util::task::TaskTracker;
use tracing::Instrument;

use crate::simulator::{SimulationOutcome, TranscriptionSimulator};

/// Handle to one in-flight simulation.
#[derive(Debug)]
pub struct SimulationHandle {
    interview_id: InterviewId,
    join: JoinHandle<SimulationOutcome>,
}

impl SimulationHandle {
    pub fn interview_id(&self) -> &str {
        &self.interview_id
    }

    /// Wait for the simulation to finish.
    pub async fn wait(self) -> Result<SimulationOutcome, CoreError> {
        self.join.await.map_err(|e| {
            CoreError::Internal(format!(
                "Simulation task for {} ended abnormally: {e}",
                self.interview_id
            ))
        })
    }
}

pub struct TranscriptionDispatcher {
    simulator: Arc<TranscriptionSimulator>,
    tracker: TaskTracker,
}

impl TranscriptionDispatcher {
    pub fn new(simulator: Arc<TranscriptionSimulator>) -> Self {
        Self {
            simulator,
            tracker: TaskTracker::new(),
        }
    }

    /// Spawn a simulation for an interview that has already been claimed.
    pub fn dispatch(&self, interview_id: InterviewId) -> SimulationHandle {
        let simulator = Arc::clone(&self.simulator);
        let span = tracing::info_span!("transcription", interview_id = %interview_id);
        let id = interview_id.clone();

        let join = self
            .tracker
            .spawn(async move { simulator.run(&id).await }.instrument(span));

        SimulationHandle { interview_id, join }
    }

    /// Number of simulations currently running.
    pub fn in_flight(&self) -> usize {
        self.tracker.len()
    }

    /// Close the tracker and wait up to `timeout` for the
    /// simulations still running. Returns `true` if all of them finished.
    pub async fn drain(&self, timeout: Duration) -> bool {
        self.tracker.close();
        let pending = self.tracker.len();
        if pending > 0 {
            tracing::info!(pending, "Waiting for in-flight transcriptions");
        }
        tokio::time::timeout(timeout, self.tracker.wait()).await.is_ok()
    }
}
