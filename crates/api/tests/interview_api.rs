//! Integration tests for the `/api/interviews` endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, delete, get, post, post_multipart, upload};

// ---------------------------------------------------------------------------
// Upload
// ---------------------------------------------------------------------------

#[tokio::test]
async fn upload_returns_uploaded_record() {
    let (_dir, app) = build_test_app().await;
    let json = upload(app.clone(), "Screening Call.WAV", b"RIFF....WAVE").await;

    let id = json["id"].as_str().unwrap();
    assert_eq!(json["status"], "uploaded");
    assert_eq!(json["original_name"], "Screening Call.WAV");
    assert_eq!(json["filename"], format!("{id}.wav"));
    assert_eq!(json["file_size"], 12);
    assert!(json["transcript"].is_null());
    assert!(json["analysis"].is_null());

    let path = json["file_path"].as_str().unwrap();
    assert_eq!(std::fs::read(path).unwrap(), b"RIFF....WAVE");
}

#[tokio::test]
async fn upload_unsupported_format_returns_400() {
    let (_dir, app) = build_test_app().await;
    let response = post_multipart(
        app,
        "/api/interviews/upload",
        common::multipart_body("file", "notes.txt", b"hello"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNSUPPORTED_FORMAT");
    assert_eq!(json["detail"], "Unsupported format .txt");
}

#[tokio::test]
async fn upload_too_large_returns_400() {
    let (_dir, app) = build_test_app().await;
    let payload = vec![0u8; common::TEST_MAX_UPLOAD_BYTES as usize + 1];
    let response = post_multipart(
        app.clone(),
        "/api/interviews/upload",
        common::multipart_body("file", "long.mp4", &payload),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "FILE_TOO_LARGE");

    let list = body_json(get(app, "/api/interviews").await).await;
    assert_eq!(list.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn upload_over_default_limit_reports_file_too_large() {
    const MIB: usize = 1024 * 1024;
    let (_dir, app) =
        common::build_test_app_with_limit(intervu_core::upload::DEFAULT_MAX_UPLOAD_BYTES).await;
    let payload = vec![0u8; 101 * MIB];

    let response = post_multipart(
        app.clone(),
        "/api/interviews/upload",
        common::multipart_body("file", "big.mp3", &payload),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "FILE_TOO_LARGE");
    assert_eq!(json["detail"], "File too large (>100MB)");

    let list = body_json(get(app, "/api/interviews").await).await;
    assert_eq!(list.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn upload_far_over_body_limit_reports_file_too_large() {
    let (_dir, app) = build_test_app().await;
    // Well past the file limit plus the multipart allowance.
    let payload = vec![0u8; 3 * 1024 * 1024];

    let response = post_multipart(
        app,
        "/api/interviews/upload",
        common::multipart_body("file", "big.wav", &payload),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "FILE_TOO_LARGE");
    assert_eq!(json["detail"], "File too large (>1024 bytes)");
}

#[tokio::test]
async fn upload_at_limit_succeeds() {
    let (_dir, app) = build_test_app().await;
    let payload = vec![1u8; common::TEST_MAX_UPLOAD_BYTES as usize];
    let json = upload(app, "exact.mp3", &payload).await;
    assert_eq!(json["file_size"], common::TEST_MAX_UPLOAD_BYTES);
}

#[tokio::test]
async fn upload_without_file_field_returns_400() {
    let (_dir, app) = build_test_app().await;
    let response = post_multipart(
        app,
        "/api/interviews/upload",
        common::multipart_body("attachment", "call.mp3", b"x"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}

// ---------------------------------------------------------------------------
// Query
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_is_empty_initially() {
    let (_dir, app) = build_test_app().await;
    let response = get(app, "/api/interviews").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, serde_json::json!([]));
}

#[tokio::test]
async fn list_returns_newest_first() {
    let (_dir, app) = build_test_app().await;
    let mut ids = Vec::new();
    for name in ["t1.mp3", "t2.mp3", "t3.mp3"] {
        let json = upload(app.clone(), name, b"x").await;
        ids.push(json["id"].as_str().unwrap().to_string());
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }

    let list = body_json(get(app, "/api/interviews").await).await;
    let listed: Vec<_> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["id"].as_str().unwrap().to_string())
        .collect();
    ids.reverse();
    assert_eq!(listed, ids);
}

#[tokio::test]
async fn unknown_id_returns_404_everywhere() {
    let (_dir, app) = build_test_app().await;

    for response in [
        get(app.clone(), "/api/interviews/does-not-exist").await,
        get(app.clone(), "/api/interviews/does-not-exist/status").await,
        post(app.clone(), "/api/interviews/does-not-exist/transcribe").await,
        delete(app.clone(), "/api/interviews/does-not-exist").await,
    ] {
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["detail"], "Interview not found");
    }
}

#[tokio::test]
async fn status_polling_leaves_record_unchanged() {
    let (_dir, app) = build_test_app().await;
    let created = upload(app.clone(), "call.mp3", b"x").await;
    let id = created["id"].as_str().unwrap();

    for _ in 0..3 {
        let json = body_json(get(app.clone(), &format!("/api/interviews/{id}/status")).await).await;
        assert_eq!(json, serde_json::json!({ "status": "uploaded" }));
    }
    let fetched = body_json(get(app, &format!("/api/interviews/{id}")).await).await;
    assert_eq!(fetched, created);
}

// ---------------------------------------------------------------------------
// Transcription
// ---------------------------------------------------------------------------

#[tokio::test]
async fn transcribe_runs_to_completion() {
    let (_dir, app) = build_test_app().await;
    let created = upload(app.clone(), "call.mov", b"moov").await;
    let id = created["id"].as_str().unwrap();

    let response = post(app.clone(), &format!("/api/interviews/{id}/transcribe")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({ "ok": true, "status": "processing" })
    );

    // Mid-flight: processing, nothing fabricated yet.
    let mid = body_json(get(app.clone(), &format!("/api/interviews/{id}")).await).await;
    assert_eq!(mid["status"], "processing");
    assert!(mid["transcript"].is_null());
    assert!(mid["analysis"].is_null());

    common::wait_for_status(app.clone(), id, "completed").await;

    let done = body_json(get(app, &format!("/api/interviews/{id}")).await).await;
    assert!(!done["transcript"].as_array().unwrap().is_empty());

    let analysis = &done["analysis"];
    for key in [
        "overallScore",
        "communicationSkills",
        "technicalCompetency",
        "problemSolving",
        "culturalFit",
        "experience",
    ] {
        let score = analysis["hrMetrics"][key].as_u64().unwrap();
        assert!((6..=10).contains(&score), "{key} = {score}");
    }
    // The embedded sample carries ten keywords.
    assert_eq!(analysis["keywords"].as_array().unwrap().len(), 5);
    assert!(analysis["summary"].is_string());
    assert!(analysis["recommendations"].is_string());
    assert!(["positive", "neutral", "negative"].contains(&analysis["sentiment"].as_str().unwrap()));
    assert!(["excellent", "good", "fair"].contains(&analysis["interviewQuality"].as_str().unwrap()));
}

#[tokio::test]
async fn retrigger_reports_existing_status() {
    let (_dir, app) = build_test_app().await;
    let created = upload(app.clone(), "call.mp4", b"x").await;
    let id = created["id"].as_str().unwrap();
    let uri = format!("/api/interviews/{id}/transcribe");

    let first = body_json(post(app.clone(), &uri).await).await;
    let second = body_json(post(app.clone(), &uri).await).await;
    assert_eq!(first["status"], "processing");
    assert_eq!(second["status"], "processing");

    common::wait_for_status(app.clone(), id, "completed").await;
    let completed = body_json(get(app.clone(), &format!("/api/interviews/{id}")).await).await;

    let third = body_json(post(app.clone(), &uri).await).await;
    assert_eq!(third, serde_json::json!({ "ok": true, "status": "completed" }));

    let after = body_json(get(app, &format!("/api/interviews/{id}")).await).await;
    assert_eq!(after, completed);
}

// ---------------------------------------------------------------------------
// Deletion
// ---------------------------------------------------------------------------

#[tokio::test]
async fn delete_removes_record_and_file() {
    let (_dir, app) = build_test_app().await;
    let created = upload(app.clone(), "call.wav", b"x").await;
    let id = created["id"].as_str().unwrap();
    let path = created["file_path"].as_str().unwrap().to_string();

    let response = delete(app.clone(), &format!("/api/interviews/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, serde_json::json!({ "ok": true }));
    assert!(!std::path::Path::new(&path).exists());

    let response = get(app.clone(), &format!("/api/interviews/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete(app, &format!("/api/interviews/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_succeeds_when_file_already_missing() {
    let (_dir, app) = build_test_app().await;
    let created = upload(app.clone(), "call.wav", b"x").await;
    let id = created["id"].as_str().unwrap();
    std::fs::remove_file(created["file_path"].as_str().unwrap()).unwrap();

    let response = delete(app.clone(), &format!("/api/interviews/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(app, &format!("/api/interviews/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
