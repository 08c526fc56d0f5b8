//! Shared response bodies for API handlers.
//!
//! Small acknowledgement shapes returned by the interview endpoints. Use
//! these instead of ad-hoc `serde_json::json!` values to get compile-time
//! type safety and consistent serialization.

use intervu_core::status::InterviewStatus;
use serde::Serialize;

/// `{ "ok": true }` acknowledgement.
#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

impl OkResponse {
    pub fn ok() -> Self {
        Self { ok: true }
    }
}

/// `{ "ok": true, "status": ... }` returned by the transcribe trigger.
#[derive(Debug, Serialize)]
pub struct TriggerResponse {
    pub ok: bool,
    pub status: InterviewStatus,
}

/// `{ "status": ... }` returned by the status endpoint.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: InterviewStatus,
}
