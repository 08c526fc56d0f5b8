use std::path::PathBuf;
use std::time::Duration;

use intervu_core::upload::DEFAULT_MAX_UPLOAD_BYTES;
use intervu_pipeline::ServiceSettings;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `300`, uploads can be large).
    pub request_timeout_secs: u64,
    /// How long shutdown waits for in-flight transcriptions (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// Directory uploaded media is written to (created if absent).
    pub upload_dir: PathBuf,
    /// Largest accepted upload in bytes (default: 100 MiB).
    pub max_upload_bytes: u64,
    /// Simulated transcription delay in milliseconds (default: `2000`).
    pub processing_delay_ms: u64,
    /// Fixed seed for generated analyses; unset means OS entropy.
    pub rng_seed: Option<u64>,
    /// Override for the embedded sample transcript.
    pub sample_transcript_path: Option<PathBuf>,
    /// Override for the embedded sample analysis.
    pub sample_analysis_path: Option<PathBuf>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Default                  |
    /// |--------------------------|--------------------------|
    /// | `HOST`                   | `0.0.0.0`                |
    /// | `PORT`                   | `8000`                   |
    /// | `CORS_ORIGINS`           | `http://localhost:8080`  |
    /// | `REQUEST_TIMEOUT_SECS`   | `300`                    |
    /// | `SHUTDOWN_TIMEOUT_SECS`  | `30`                     |
    /// | `UPLOAD_DIR`             | `./uploads`              |
    /// | `MAX_UPLOAD_BYTES`       | `104857600`              |
    /// | `PROCESSING_DELAY_MS`    | `2000`                   |
    /// | `RNG_SEED`               | unset                    |
    /// | `SAMPLE_TRANSCRIPT_PATH` | unset (embedded)         |
    /// | `SAMPLE_ANALYSIS_PATH`   | unset (embedded)         |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:8080".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "300".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let upload_dir = std::env::var("UPLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./uploads"));

        let max_upload_bytes: u64 = std::env::var("MAX_UPLOAD_BYTES")
            .ok()
            .map(|v| v.parse().expect("MAX_UPLOAD_BYTES must be a valid u64"))
            .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES);

        let processing_delay_ms: u64 = std::env::var("PROCESSING_DELAY_MS")
            .unwrap_or_else(|_| "2000".into())
            .parse()
            .expect("PROCESSING_DELAY_MS must be a valid u64");

        let rng_seed = std::env::var("RNG_SEED")
            .ok()
            .map(|v| v.parse().expect("RNG_SEED must be a valid u64"));

        let sample_transcript_path = std::env::var("SAMPLE_TRANSCRIPT_PATH").ok().map(PathBuf::from);
        let sample_analysis_path = std::env::var("SAMPLE_ANALYSIS_PATH").ok().map(PathBuf::from);

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            upload_dir,
            max_upload_bytes,
            processing_delay_ms,
            rng_seed,
            sample_transcript_path,
            sample_analysis_path,
        }
    }

    /// Settings handed to the interview service.
    pub fn service_settings(&self) -> ServiceSettings {
        ServiceSettings {
            max_upload_bytes: self.max_upload_bytes,
            processing_delay: Duration::from_millis(self.processing_delay_ms),
            rng_seed: self.rng_seed,
        }
    }

    /// Request body limit for the upload route: the file limit plus room
    /// for multipart framing, so slightly oversized files still reach the
    /// handler and get a descriptive 400.
    pub fn upload_body_limit(&self) -> usize {
        const MULTIPART_OVERHEAD: u64 = 1024 * 1024;
        usize::try_from(self.max_upload_bytes.saturating_add(MULTIPART_OVERHEAD))
            .unwrap_or(usize::MAX)
    }
}
