//! Transcription simulator.
//!
//! Stands in for real transcription/analysis. A run starts from a record
//! that has already been claimed (`processing`), waits out an artificial
//! queueing delay, then either completes the record with the sample
//! transcript and a freshly generated analysis or marks it `failed`.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use intervu_core::analysis::{generate_analysis, Analysis};
use intervu_core::error::CoreError;
use intervu_core::fixtures::{Fixtures, TranscriptItem};
use intervu_core::status::InterviewStatus;
use intervu_db::InterviewStore;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Artificial queueing delay before output is produced.
pub const DEFAULT_PROCESSING_DELAY: Duration = Duration::from_secs(2);

/// How a single simulation ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimulationOutcome {
    /// Transcript and analysis were attached; status is `completed`.
    Completed,
    /// Fabrication failed; status is `failed`.
    Failed(String),
    /// The record was deleted while the simulation was in flight.
    Abandoned,
}

pub struct TranscriptionSimulator {
    store: InterviewStore,
    fixtures: Arc<Fixtures>,
    delay: Duration,
    rng: Mutex<StdRng>,
}

impl TranscriptionSimulator {
    /// Create a simulator. With `seed` set, the sequence of generated
    /// analyses is reproducible; otherwise the RNG is seeded from the OS.
    pub fn new(
        store: InterviewStore,
        fixtures: Arc<Fixtures>,
        delay: Duration,
        seed: Option<u64>,
    ) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            store,
            fixtures,
            delay,
            rng: Mutex::new(rng),
        }
    }

    /// Run one simulation for `id` to completion or failure.
    pub async fn run(&self, id: &str) -> SimulationOutcome {
        tracing::info!(
            interview_id = %id,
            delay_ms = self.delay.as_millis() as u64,
            "Transcription simulation started",
        );
        tokio::time::sleep(self.delay).await;

        match self.complete(id).await {
            Ok(()) => {
                tracing::info!(interview_id = %id, "Transcription completed");
                SimulationOutcome::Completed
            }
            Err(CoreError::NotFound { .. }) => {
                tracing::warn!(interview_id = %id, "Interview deleted during transcription");
                SimulationOutcome::Abandoned
            }
            Err(e) => {
                tracing::error!(interview_id = %id, error = %e, "Transcription failed");
                self.mark_failed(id).await;
                SimulationOutcome::Failed(e.to_string())
            }
        }
    }

    async fn complete(&self, id: &str) -> Result<(), CoreError> {
        let mut interview = self
            .store
            .find_by_id(id)
            .await
            .ok_or_else(|| CoreError::not_found("Interview", id))?;

        let (transcript, analysis) = self.fabricate()?;
        interview.complete(transcript, analysis)?;
        self.store.update(interview).await?;
        Ok(())
    }

    fn fabricate(&self) -> Result<(Vec<TranscriptItem>, Analysis), CoreError> {
        if self.fixtures.transcript.is_empty() {
            return Err(CoreError::Simulation("sample transcript is empty".into()));
        }
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| CoreError::Simulation("random source poisoned".into()))?;
        let analysis = generate_analysis(&self.fixtures.analysis, &mut *rng);
        Ok((self.fixtures.transcript.clone(), analysis))
    }

    async fn mark_failed(&self, id: &str) {
        let Some(mut interview) = self.store.find_by_id(id).await else {
            return;
        };
        if interview.status != InterviewStatus::Processing {
            return;
        }
        if let Err(e) = interview.fail() {
            tracing::error!(interview_id = %id, error = %e, "Cannot mark interview failed");
            return;
        }
        if let Err(e) = self.store.update(interview).await {
            tracing::warn!(interview_id = %id, error = %e, "Failed status not persisted");
        }
    }
}
