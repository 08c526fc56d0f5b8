//! Handlers for the `/interviews` resource.
//!
//! Thin transport over [`intervu_pipeline::InterviewService`]: extract the
//! request, call the service, shape the JSON.

use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::Json;
use intervu_core::error::CoreError;
use intervu_db::models::interview::Interview;

use crate::error::{AppError, AppResult};
use crate::response::{OkResponse, StatusResponse, TriggerResponse};
use crate::state::AppState;

/// Name of the multipart field carrying the media file.
const FILE_FIELD: &str = "file";

/// POST /api/interviews/upload
///
/// Accepts a multipart body with a `file` field. Unknown fields are ignored.
/// A body cut off by the route's size limit is reported as `FILE_TOO_LARGE`.
pub async fn upload(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> AppResult<Json<Interview>> {
    let body_len = headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok());
    let mut file_data: Option<(String, axum::body::Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, &state, body_len))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| multipart_error(e, &state, body_len))?;
        file_data = Some((filename, data));
    }

    let (filename, data) =
        file_data.ok_or_else(|| AppError::BadRequest("Missing required 'file' field".into()))?;

    let interview = state.interviews.upload(&filename, &data).await?;
    Ok(Json(interview))
}

/// Map a multipart read failure. Hitting the body limit means the file is
/// over the upload limit; the request length stands in for its size.
fn multipart_error(err: MultipartError, state: &AppState, body_len: Option<u64>) -> AppError {
    if err.status() != StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::BadRequest(err.body_text());
    }
    let limit = state.interviews.max_upload_bytes();
    tracing::info!(limit, body_len, "Upload rejected at body limit");
    CoreError::FileTooLarge {
        size: body_len.unwrap_or_else(|| limit.saturating_add(1)),
        limit,
    }
    .into()
}

/// GET /api/interviews
///
/// All interviews, newest upload first.
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Interview>>> {
    Ok(Json(state.interviews.list().await))
}

/// GET /api/interviews/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Interview>> {
    let interview = state.interviews.get(&id).await?;
    Ok(Json(interview))
}

/// DELETE /api/interviews/{id}
///
/// Removal of the backing file is best-effort; the record is always removed.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<OkResponse>> {
    state.interviews.delete(&id).await?;
    Ok(Json(OkResponse::ok()))
}

/// POST /api/interviews/{id}/transcribe
///
/// Schedules a simulated transcription and returns immediately. Repeating
/// the call while `processing` or after `completed` is a no-op reporting the
/// current status.
pub async fn transcribe(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<TriggerResponse>> {
    let outcome = state.interviews.trigger(&id).await?;
    Ok(Json(TriggerResponse {
        ok: true,
        status: outcome.status,
    }))
}

/// GET /api/interviews/{id}/status
pub async fn status(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<StatusResponse>> {
    let status = state.interviews.status(&id).await?;
    Ok(Json(StatusResponse { status }))
}
