//! Route definitions for the `/interviews` resource.
//!
//! ```text
//! POST   /upload               upload
//! GET    /                     list
//! GET    /{id}                 get_by_id
//! DELETE /{id}                 delete
//! POST   /{id}/transcribe      transcribe
//! GET    /{id}/status          status
//! ```

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use crate::handlers::interviews;
use crate::state::AppState;

/// `upload_body_limit` overrides axum's default request body limit on the
/// upload route only.
pub fn router(upload_body_limit: usize) -> Router<AppState> {
    Router::new()
        .route(
            "/upload",
            post(interviews::upload).layer(DefaultBodyLimit::max(upload_body_limit)),
        )
        .route("/", get(interviews::list))
        .route(
            "/{id}",
            get(interviews::get_by_id).delete(interviews::delete),
        )
        .route("/{id}/transcribe", post(interviews::transcribe))
        .route("/{id}/status", get(interviews::status))
}
