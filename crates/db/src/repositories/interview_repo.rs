//! Record store for interviews.
//!
//! [`InterviewRepo`] is the seam the rest of the system talks to; it is
//! injected as `Arc<dyn InterviewRepo>` so backends are swappable.
//! [`InMemoryInterviewRepo`] keeps everything in a `RwLock<HashMap>`: reads
//! take the shared lock and hand back clones, so a reader never observes a
//! half-written record.

use std::collections::HashMap;

use async_trait::async_trait;
use intervu_core::error::CoreError;
use intervu_core::status::InterviewStatus;
use tokio::sync::RwLock;

use crate::models::interview::Interview;

const ENTITY: &str = "Interview";

/// Result of trying to claim an interview for transcription.
#[derive(Debug, Clone, PartialEq)]
pub enum Claim {
    /// The record moved to `processing`; the caller owns the simulation.
    Claimed(Interview),
    /// A simulation is running or already finished; nothing changed.
    AlreadyActive(InterviewStatus),
}

#[async_trait]
pub trait InterviewRepo: Send + Sync {
    /// Insert a new interview. Fails with `Conflict` if the id is taken.
    async fn insert(&self, interview: Interview) -> Result<Interview, CoreError>;

    /// Snapshot of a single interview.
    async fn find_by_id(&self, id: &str) -> Option<Interview>;

    /// All interviews, newest `upload_date` first.
    async fn list(&self) -> Vec<Interview>;

    /// Replace an existing interview. Fails with `NotFound` if it has been
    /// deleted meanwhile; a deleted record is never resurrected.
    async fn update(&self, interview: Interview) -> Result<Interview, CoreError>;

    /// Remove an interview, returning it.
    async fn delete(&self, id: &str) -> Result<Interview, CoreError>;

    /// Atomically move an `uploaded` or `failed` interview to `processing`.
    ///
    /// Two concurrent claims on the same record can never both succeed.
    async fn claim_for_processing(&self, id: &str) -> Result<Claim, CoreError>;

    /// Number of stored interviews.
    async fn count(&self) -> usize;
}

/// Process-local store backed by a hash map.
#[derive(Default)]
pub struct InMemoryInterviewRepo {
    interviews: RwLock<HashMap<String, Interview>>,
}

impl InMemoryInterviewRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl InterviewRepo for InMemoryInterviewRepo {
    async fn insert(&self, interview: Interview) -> Result<Interview, CoreError> {
        let mut interviews = self.interviews.write().await;
        if interviews.contains_key(&interview.id) {
            return Err(CoreError::Conflict(format!(
                "Interview {} already exists",
                interview.id
            )));
        }
        interviews.insert(interview.id.clone(), interview.clone());
        Ok(interview)
    }

    async fn find_by_id(&self, id: &str) -> Option<Interview> {
        self.interviews.read().await.get(id).cloned()
    }

    async fn list(&self) -> Vec<Interview> {
        let mut all: Vec<Interview> = self.interviews.read().await.values().cloned().collect();
        all.sort_by(|a, b| {
            b.upload_date
                .cmp(&a.upload_date)
                .then_with(|| a.id.cmp(&b.id))
        });
        all
    }

    async fn update(&self, interview: Interview) -> Result<Interview, CoreError> {
        let mut interviews = self.interviews.write().await;
        match interviews.get_mut(&interview.id) {
            Some(slot) => {
                *slot = interview.clone();
                Ok(interview)
            }
            None => Err(CoreError::not_found(ENTITY, interview.id)),
        }
    }

    async fn delete(&self, id: &str) -> Result<Interview, CoreError> {
        self.interviews
            .write()
            .await
            .remove(id)
            .ok_or_else(|| CoreError::not_found(ENTITY, id))
    }

    async fn claim_for_processing(&self, id: &str) -> Result<Claim, CoreError> {
        let mut interviews = self.interviews.write().await;
        let interview = interviews
            .get_mut(id)
            .ok_or_else(|| CoreError::not_found(ENTITY, id))?;

        if interview.status.blocks_retrigger() {
            return Ok(Claim::AlreadyActive(interview.status));
        }
        interview.begin_processing()?;
        tracing::debug!(interview_id = %id, "Interview claimed for processing");
        Ok(Claim::Claimed(interview.clone()))
    }

    async fn count(&self) -> usize {
        self.interviews.read().await.len()
    }
}
