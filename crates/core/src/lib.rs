//! Domain logic for the interview transcription backend.
//!
//! Pure, I/O-light building blocks shared by the store, the processing
//! pipeline and the HTTP layer: error taxonomy, lifecycle status, upload
//! validation, fixtures and fabricated analysis.

pub mod analysis;
pub mod error;
pub mod fixtures;
pub mod status;
pub mod types;
pub mod upload;
