//! Interview lifecycle status and its state machine.
//!
//! ```text
//! uploaded ──► processing ──► completed
//!                  │
//!                  └────────► failed ──► processing (explicit re-trigger)
//! ```
//!
//! `completed` is terminal. `failed` is terminal for the simulator but may
//! be re-triggered by a caller. Nothing ever moves back to `uploaded`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Upload lifecycle status, serialized as its lowercase name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterviewStatus {
    Uploaded,
    Processing,
    Completed,
    Failed,
}

impl InterviewStatus {
    /// Wire name of the status.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Uploaded => "uploaded",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    /// Whether moving from `self` to `next` is a legal transition.
    pub fn can_transition_to(self, next: InterviewStatus) -> bool {
        matches!(
            (self, next),
            (Self::Uploaded, Self::Processing)
                | (Self::Failed, Self::Processing)
                | (Self::Processing, Self::Completed)
                | (Self::Processing, Self::Failed)
        )
    }

    /// A transcription is running or has already produced output; triggering
    /// again must not start another simulation.
    pub fn blocks_retrigger(self) -> bool {
        matches!(self, Self::Processing | Self::Completed)
    }
}

impl fmt::Display for InterviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
