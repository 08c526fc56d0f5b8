use std::sync::Arc;

pub mod models;
pub mod repositories;

/// Shared handle to the record store, injected wherever records are read or written.
pub type InterviewStore = Arc<dyn repositories::InterviewRepo>;

/// Create the default process-local store.
pub fn create_memory_store() -> InterviewStore {
    Arc::new(repositories::InMemoryInterviewRepo::new())
}
