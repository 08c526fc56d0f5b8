//! Interview entity model and DTOs.

use intervu_core::analysis::Analysis;
use intervu_core::error::CoreError;
use intervu_core::fixtures::TranscriptItem;
use intervu_core::status::InterviewStatus;
use intervu_core::types::{InterviewId, Timestamp};
use serde::{Deserialize, Serialize};

/// One uploaded media file and whatever has been derived from it.
///
/// `transcript` and `analysis` are set together, and only once the status
/// reaches `completed`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interview {
    pub id: InterviewId,
    pub filename: String,
    pub original_name: String,
    pub file_size: u64,
    pub file_path: String,
    pub upload_date: Timestamp,
    pub status: InterviewStatus,
    pub transcript: Option<Vec<TranscriptItem>>,
    pub analysis: Option<Analysis>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new interview after its file has been stored.
#[derive(Debug, Clone)]
pub struct CreateInterview {
    pub id: InterviewId,
    pub filename: String,
    pub original_name: String,
    pub file_size: u64,
    pub file_path: String,
}

impl Interview {
    /// Build a freshly uploaded interview. All timestamps are "now".
    pub fn new(input: CreateInterview) -> Self {
        let now = chrono::Utc::now();
        Self {
            id: input.id,
            filename: input.filename,
            original_name: input.original_name,
            file_size: input.file_size,
            file_path: input.file_path,
            upload_date: now,
            status: InterviewStatus::Uploaded,
            transcript: None,
            analysis: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Move to `next`, refreshing `updated_at`. Illegal moves are rejected
    /// and leave the record untouched.
    fn transition(&mut self, next: InterviewStatus) -> Result<(), CoreError> {
        if !self.status.can_transition_to(next) {
            return Err(CoreError::Conflict(format!(
                "Interview {} cannot move from {} to {next}",
                self.id, self.status
            )));
        }
        self.status = next;
        self.updated_at = chrono::Utc::now();
        Ok(())
    }

    /// `uploaded | failed -> processing`.
    pub fn begin_processing(&mut self) -> Result<(), CoreError> {
        self.transition(InterviewStatus::Processing)?;
        self.transcript = None;
        self.analysis = None;
        Ok(())
    }

    /// `processing -> completed`, attaching transcript and analysis.
    pub fn complete(
        &mut self,
        transcript: Vec<TranscriptItem>,
        analysis: Analysis,
    ) -> Result<(), CoreError> {
        self.transition(InterviewStatus::Completed)?;
        self.transcript = Some(transcript);
        self.analysis = Some(analysis);
        Ok(())
    }

    /// `processing -> failed`. No partial output is retained.
    pub fn fail(&mut self) -> Result<(), CoreError> {
        self.transition(InterviewStatus::Failed)?;
        self.transcript = None;
        self.analysis = None;
        Ok(())
    }
}
