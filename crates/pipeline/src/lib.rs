//! Upload lifecycle: file storage, the transcription simulator and its
//! background dispatcher, and the service that ties them to the record store.

pub mod dispatcher;
pub mod service;
pub mod simulator;
pub mod storage;

pub use service::{InterviewService, ServiceSettings, TriggerOutcome};
