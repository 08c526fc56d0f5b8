#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use intervu_core::fixtures::Fixtures;
use intervu_pipeline::storage::UploadStorage;
use intervu_pipeline::InterviewService;
use tempfile::TempDir;
use tower::ServiceExt;

use intervu_api::config::ServerConfig;
use intervu_api::router::build_app_router;
use intervu_api::state::AppState;

/// Upload size limit used by the HTTP tests; large payloads are covered in
/// the service tests.
pub const TEST_MAX_UPLOAD_BYTES: u64 = 1024;

/// Boundary used by [`multipart_body`].
pub const BOUNDARY: &str = "intervu-test-boundary";

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:8080` as CORS origin (matching the dev default),
/// a short processing delay and a fixed RNG seed.
pub fn test_config(upload_dir: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:8080".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 5,
        upload_dir: upload_dir.to_path_buf(),
        max_upload_bytes: TEST_MAX_UPLOAD_BYTES,
        processing_delay_ms: 150,
        rng_seed: Some(7),
        sample_transcript_path: None,
        sample_analysis_path: None,
    }
}

/// Build the full application router over a fresh store and a temporary
/// upload directory. Keep the returned `TempDir` alive for the test's
/// duration.
pub async fn build_test_app() -> (TempDir, Router) {
    build_test_app_with_limit(TEST_MAX_UPLOAD_BYTES).await
}

/// Same as [`build_test_app`] with a custom upload size limit.
pub async fn build_test_app_with_limit(max_upload_bytes: u64) -> (TempDir, Router) {
    let dir = tempfile::tempdir().unwrap();
    let config = ServerConfig {
        max_upload_bytes,
        ..test_config(&dir.path().join("uploads"))
    };

    let storage = UploadStorage::open(&config.upload_dir).await.unwrap();
    let interviews = Arc::new(InterviewService::new(
        intervu_db::create_memory_store(),
        storage,
        Arc::new(Fixtures::embedded().unwrap()),
        config.service_settings(),
    ));

    let state = AppState {
        interviews,
        config: Arc::new(config.clone()),
    };

    (dir, build_app_router(state, &config))
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn post(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// Encode a single-file multipart body.
pub fn multipart_body(field: &str, filename: &str, data: &[u8]) -> Vec<u8> {
    let mut body = format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n\
         Content-Type: application/octet-stream\r\n\r\n"
    )
    .into_bytes();
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub async fn post_multipart(app: Router, uri: &str, body: Vec<u8>) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

/// Upload `data` as `filename` and return the created record.
pub async fn upload(app: Router, filename: &str, data: &[u8]) -> serde_json::Value {
    let response = post_multipart(
        app,
        "/api/interviews/upload",
        multipart_body("file", filename, data),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Poll the status endpoint until it reports `expected` or five seconds pass.
pub async fn wait_for_status(app: Router, id: &str, expected: &str) {
    let uri = format!("/api/interviews/{id}/status");
    for _ in 0..100 {
        let json = body_json(get(app.clone(), &uri).await).await;
        if json["status"] == expected {
            return;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    panic!("interview {id} never reached status {expected}");
}
