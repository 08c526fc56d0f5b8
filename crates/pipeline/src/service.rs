//! The operations the HTTP layer dispatches onto: upload, list, get,
//! status, trigger and delete.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use intervu_core::error::CoreError;
use intervu_core::fixtures::Fixtures;
use intervu_core::status::InterviewStatus;
use intervu_core::types::new_interview_id;
use intervu_core::upload::{self, DEFAULT_MAX_UPLOAD_BYTES};
use intervu_db::models::interview::{CreateInterview, Interview};
use intervu_db::repositories::Claim;
use intervu_db::InterviewStore;

use crate::dispatcher::{SimulationHandle, TranscriptionDispatcher};
use crate::simulator::{TranscriptionSimulator, DEFAULT_PROCESSING_DELAY};
use crate::storage::UploadStorage;

const ENTITY: &str = "Interview";

/// Tunables for [`InterviewService`].
#[derive(Debug, Clone)]
pub struct ServiceSettings {
    /// Largest accepted upload in bytes.
    pub max_upload_bytes: u64,
    /// Artificial delay of each simulated transcription.
    pub processing_delay: Duration,
    /// Seed for the analysis generator; `None` seeds from the OS.
    pub rng_seed: Option<u64>,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            processing_delay: DEFAULT_PROCESSING_DELAY,
            rng_seed: None,
        }
    }
}

/// Result of a trigger request.
#[derive(Debug)]
pub struct TriggerOutcome {
    /// Status to report to the caller.
    pub status: InterviewStatus,
    /// Present only when this call started a new simulation.
    pub handle: Option<SimulationHandle>,
}

pub struct InterviewService {
    store: InterviewStore,
    storage: UploadStorage,
    dispatcher: TranscriptionDispatcher,
    max_upload_bytes: u64,
}

impl InterviewService {
    pub fn new(
        store: InterviewStore,
        storage: UploadStorage,
        fixtures: Arc<Fixtures>,
        settings: ServiceSettings,
    ) -> Self {
        let simulator = Arc::new(TranscriptionSimulator::new(
            Arc::clone(&store),
            fixtures,
            settings.processing_delay,
            settings.rng_seed,
        ));
        Self {
            store,
            storage,
            dispatcher: TranscriptionDispatcher::new(simulator),
            max_upload_bytes: settings.max_upload_bytes,
        }
    }

    pub fn max_upload_bytes(&self) -> u64 {
        self.max_upload_bytes
    }

    /// Validate and persist an upload, then record it as `uploaded`.
    ///
    /// The file is fully written before the record is inserted, so a
    /// visible record never points at a missing or partial file.
    pub async fn upload(&self, original_name: &str, data: &[u8]) -> Result<Interview, CoreError> {
        let size = data.len() as u64;
        let ext = upload::validate_upload(original_name, size, self.max_upload_bytes)?;

        let id = new_interview_id();
        let filename = upload::stored_filename(&id, &ext);
        let path = self.storage.write(&filename, data).await?;

        let interview = Interview::new(CreateInterview {
            id,
            filename,
            original_name: original_name.to_string(),
            file_size: size,
            file_path: path.to_string_lossy().into_owned(),
        });

        match self.store.insert(interview).await {
            Ok(interview) => {
                tracing::info!(
                    interview_id = %interview.id,
                    original_name = %interview.original_name,
                    file_size = interview.file_size,
                    "Interview uploaded",
                );
                Ok(interview)
            }
            Err(e) => {
                self.storage.remove(&path).await;
                Err(e)
            }
        }
    }

    /// All interviews, newest upload first.
    pub async fn list(&self) -> Vec<Interview> {
        self.store.list().await
    }

    pub async fn get(&self, id: &str) -> Result<Interview, CoreError> {
        self.store
            .find_by_id(id)
            .await
            .ok_or_else(|| CoreError::not_found(ENTITY, id))
    }

    pub async fn status(&self, id: &str) -> Result<InterviewStatus, CoreError> {
        self.get(id).await.map(|interview| interview.status)
    }

    /// Request transcription.
    ///
    /// A record that is already `processing` or `completed` is left alone
    /// and its status reported. Otherwise the record moves to `processing`
    /// and a simulation is scheduled without waiting for it.
    pub async fn trigger(&self, id: &str) -> Result<TriggerOutcome, CoreError> {
        match self.store.claim_for_processing(id).await? {
            Claim::AlreadyActive(status) => {
                tracing::debug!(interview_id = %id, %status, "Transcription already active");
                Ok(TriggerOutcome {
                    status,
                    handle: None,
                })
            }
            Claim::Claimed(interview) => {
                let handle = self.dispatcher.dispatch(interview.id);
                Ok(TriggerOutcome {
                    status: InterviewStatus::Processing,
                    handle: Some(handle),
                })
            }
        }
    }

    /// Remove an interview and, best-effort, its backing file.
    pub async fn delete(&self, id: &str) -> Result<(), CoreError> {
        let interview = self.get(id).await?;
        if !interview.file_path.is_empty() {
            self.storage.remove(Path::new(&interview.file_path)).await;
        }
        self.store.delete(id).await?;
        tracing::info!(interview_id = %id, "Interview deleted");
        Ok(())
    }

    pub async fn count(&self) -> usize {
        self.store.count().await
    }

    /// Number of simulations currently running.
    pub fn in_flight(&self) -> usize {
        self.dispatcher.in_flight()
    }

    /// Wait (bounded) for running simulations; used at shutdown.
    pub async fn drain(&self, timeout: Duration) -> bool {
        self.dispatcher.drain(timeout).await
    }
}
