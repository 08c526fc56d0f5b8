use std::sync::Arc;

use intervu_pipeline::InterviewService;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Upload lifecycle operations (store, storage, transcription dispatcher).
    pub interviews: Arc<InterviewService>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
