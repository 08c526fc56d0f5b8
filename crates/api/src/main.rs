use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use intervu_core::fixtures::Fixtures;
use intervu_pipeline::storage::UploadStorage;
use intervu_pipeline::InterviewService;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use intervu_api::config::ServerConfig;
use intervu_api::router::build_app_router;
use intervu_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "intervu_api=debug,intervu_pipeline=debug,intervu_db=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Fixtures ---
    let fixtures = Fixtures::load(
        config.sample_transcript_path.as_deref(),
        config.sample_analysis_path.as_deref(),
    )
    .expect("Failed to load sample fixtures");
    tracing::info!(
        transcript_segments = fixtures.transcript.len(),
        "Sample fixtures loaded"
    );

    // --- Upload storage ---
    let storage = UploadStorage::open(&config.upload_dir)
        .await
        .expect("Failed to prepare upload directory");
    tracing::info!(upload_dir = %storage.dir().display(), "Upload directory ready");

    // --- Interview service ---
    let interviews = Arc::new(InterviewService::new(
        intervu_db::create_memory_store(),
        storage,
        Arc::new(fixtures),
        config.service_settings(),
    ));

    // --- App state ---
    let state = AppState {
        interviews: Arc::clone(&interviews),
        config: Arc::new(config.clone()),
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, draining transcriptions");

    let drained = interviews
        .drain(Duration::from_secs(config.shutdown_timeout_secs))
        .await;
    if drained {
        tracing::info!("Graceful shutdown complete");
    } else {
        tracing::warn!(
            in_flight = interviews.in_flight(),
            "Shutdown timeout elapsed with transcriptions still running"
        );
    }
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
