pub mod health;
pub mod interviews;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /interviews                          list
/// /interviews/upload                   upload (multipart)
/// /interviews/{id}                     get, delete
/// /interviews/{id}/transcribe          trigger transcription (POST)
/// /interviews/{id}/status              current status
/// ```
pub fn api_routes(upload_body_limit: usize) -> Router<AppState> {
    Router::new().nest("/interviews", interviews::router(upload_body_limit))
}
